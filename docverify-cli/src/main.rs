//! DocVerify CLI
//!
//! Command-line interface for registering and verifying documents.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docverify_api::{ApiConfig, ApiServer};
use docverify_core::constants::{
    DEFAULT_REGISTRY_PATH, DEFAULT_UPLOADS_PREFIX, DEFAULT_VERIFICATION_BASE_PATH,
};
use docverify_core::types::{storage_filename, Metadata, MetadataValue};
use docverify_registry::FileStore;
use docverify_service::{
    RegisterRequest, Removal, ServiceConfig, Verification, VerificationService,
};

/// DocVerify - Document registry and verification
#[derive(Parser)]
#[command(name = "docverify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    registry: RegistryArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RegistryArgs {
    /// Path to the registry file
    #[arg(long, global = true, env = "REGISTRY_PATH", default_value = DEFAULT_REGISTRY_PATH)]
    registry: PathBuf,

    /// Base path (or URL) of the verification page
    #[arg(long, global = true, env = "VERIFICATION_BASE_PATH", default_value = DEFAULT_VERIFICATION_BASE_PATH)]
    base_path: String,

    /// Prefix for view URLs of files without a storage URL
    #[arg(long, global = true, env = "UPLOADS_PREFIX", default_value = DEFAULT_UPLOADS_PREFIX)]
    uploads_prefix: String,
}

impl RegistryArgs {
    fn service(&self) -> VerificationService {
        let config = ServiceConfig::default()
            .with_base_path(&self.base_path)
            .with_uploads_prefix(&self.uploads_prefix);
        VerificationService::with_config(Arc::new(FileStore::new(&self.registry)), config)
    }

    fn api_config(&self) -> ApiConfig {
        ApiConfig {
            registry_path: self.registry.clone(),
            verification_base_path: self.base_path.clone(),
            uploads_prefix: self.uploads_prefix.clone(),
            ..ApiConfig::from_env()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Register (or re-register) a document
    Register {
        /// Document type, e.g. Transcript
        #[arg(short, long)]
        doc: String,
        /// Registration number
        #[arg(short, long)]
        reg: String,
        /// Storage filename of the uploaded PDF
        #[arg(short, long)]
        file: String,
        /// Prefix the filename with the current timestamp, as the uploader does
        #[arg(long)]
        stamp: bool,
        /// Public URL of the stored file
        #[arg(long)]
        url: Option<String>,
        /// Student name
        #[arg(long)]
        student: Option<String>,
        /// Issuing institution
        #[arg(long)]
        institution: Option<String>,
        /// Metadata entry as key=value (repeatable)
        #[arg(short, long = "meta", value_parser = parse_meta)]
        meta: Vec<(String, MetadataValue)>,
    },

    /// Verify a document
    Verify {
        /// Document type
        doc: String,
        /// Registration number
        reg: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a registration
    Remove {
        /// Document type
        doc: String,
        /// Registration number
        reg: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List registered documents
    List,

    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },
}

fn parse_meta(raw: &str) -> std::result::Result<(String, MetadataValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    if key.trim().is_empty() {
        return Err(format!("empty metadata key in '{}'", raw));
    }
    Ok((key.trim().to_string(), MetadataValue::parse_lenient(value)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "docverify=debug,info"
    } else {
        "docverify=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Register {
            doc,
            reg,
            file,
            stamp,
            url,
            student,
            institution,
            meta,
        } => {
            let file = if stamp {
                storage_filename(&file, Utc::now().timestamp_millis())
            } else {
                file
            };
            let mut request = RegisterRequest::new(doc, reg, file);
            request.storage_url = url;
            request.student_name = student;
            request.institution = institution;
            if !meta.is_empty() {
                request.metadata = Some(meta.into_iter().collect::<Metadata>());
            }
            cmd_register(&cli.registry, request).await
        }
        Commands::Verify { doc, reg, json } => cmd_verify(&cli.registry, &doc, &reg, json).await,
        Commands::Remove { doc, reg, yes } => cmd_remove(&cli.registry, &doc, &reg, yes).await,
        Commands::List => cmd_list(&cli.registry).await,
        Commands::Serve { port, bind } => cmd_serve(&cli.registry, port, &bind).await,
    }
}

/// Register a document
async fn cmd_register(args: &RegistryArgs, request: RegisterRequest) -> Result<()> {
    println!(
        "{} {} {}",
        "📄 Registering".cyan().bold(),
        request.document_type,
        request.registration_number
    );

    let registration = args
        .service()
        .register(request)
        .await
        .context("Failed to register document")?;

    if registration.replaced() {
        println!("{}", "✅ Registration replaced".green().bold());
    } else {
        println!("{}", "✅ Document registered".green().bold());
    }
    println!("   {} {}", "File:".dimmed(), registration.document.filename);
    println!(
        "   {} {}",
        "Registered at:".dimmed(),
        registration.document.registered_at.to_rfc3339()
    );
    println!("\n   {} {}", "Verification link:".yellow(), registration.verification_url);

    Ok(())
}

/// Verify a document
async fn cmd_verify(args: &RegistryArgs, doc: &str, reg: &str, json: bool) -> Result<()> {
    let verification = args
        .service()
        .verify(doc, reg)
        .await
        .context("Failed to verify document")?;

    match verification {
        Verification::Verified(document) => {
            if json {
                let body = serde_json::json!({ "verified": true, "document": document });
                println!("{}", serde_json::to_string_pretty(&body)?);
                return Ok(());
            }

            println!("{}", "✅ Document verified".green().bold());
            println!("   {} {}", "Type:".dimmed(), document.document_type);
            println!("   {} {}", "Registration:".dimmed(), document.registration_number);
            if let Some(name) = &document.student_name {
                println!("   {} {}", "Student:".dimmed(), name);
            }
            if let Some(institution) = &document.institution {
                println!("   {} {}", "Institution:".dimmed(), institution);
            }
            println!("   {} {}", "Registered at:".dimmed(), document.registered_at.to_rfc3339());
            println!("   {} {}", "View:".yellow(), document.url);
            Ok(())
        }
        Verification::NotFound(key) => {
            if json {
                let body = serde_json::json!({
                    "verified": false,
                    "registrationNumber": key.registration_number,
                    "documentType": key.document_type,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", "❌ Document not verified".red().bold());
                println!("   {} {}", "Type:".dimmed(), key.document_type);
                println!("   {} {}", "Registration:".dimmed(), key.registration_number);
                println!("\n   Please contact the issuing institution if you believe this is an error.");
            }
            std::process::exit(1);
        }
    }
}

/// Remove a registration
async fn cmd_remove(args: &RegistryArgs, doc: &str, reg: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove registration {} / {}?", doc, reg))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
    }

    match args
        .service()
        .remove(doc, reg)
        .await
        .context("Failed to remove document")?
    {
        Removal::Removed => {
            println!("{}", "🗑️  Document removed from registry".green().bold());
            Ok(())
        }
        Removal::NotFound => bail!("No registration found for {} / {}", doc, reg),
    }
}

/// List registered documents
async fn cmd_list(args: &RegistryArgs) -> Result<()> {
    let documents = args
        .service()
        .list()
        .await
        .context("Failed to read registry")?;

    if documents.is_empty() {
        println!("{}", "⚠️  Registry is empty.".yellow());
        return Ok(());
    }

    println!("{} {} document(s)\n", "📚".cyan(), documents.len());
    for summary in &documents {
        println!(
            "   {} {}",
            summary.key().to_string().green(),
            summary.filename
        );
        println!(
            "      {} {}  {} {}",
            "registered".dimmed(),
            summary.registered_at.to_rfc3339(),
            "url".dimmed(),
            summary.url
        );
    }

    Ok(())
}

/// Run API server
async fn cmd_serve(args: &RegistryArgs, port: u16, bind: &str) -> Result<()> {
    println!("{}", "🚀 Starting DocVerify API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("   {} {}", "Registry:".dimmed(), args.registry.display());
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(args.api_config());

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}
