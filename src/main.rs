use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use gif_upload::decode::decode_from_base64;
use gif_upload::encode::encode_to_base64;
use gif_upload::{
    Config, ErrorLabel, FileInput, GalleryView, HttpTransport, SelectedFile, SubmitOutcome,
    Transport, UploadForm, UploadPipeline,
};

#[derive(Parser)]
#[command(name = "gif-upload", version, about = "Upload GIFs to a gallery server")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a GIF to the gallery server, then reload the gallery
    Upload {
        file: PathBuf,
        /// Server base URL (overrides config and GIF_UPLOAD_SERVER)
        #[arg(long)]
        server: Option<String>,
        /// Report this MIME type instead of guessing from the extension
        #[arg(long)]
        mime_type: Option<String>,
        /// Config file (default: <config dir>/gif-upload/config.json)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print or save the base64 payload of a file without sending it
    Encode {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Turn a saved base64 payload back into the original bytes
    Decode {
        payload: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

struct PathInput(SelectedFile);

impl FileInput for PathInput {
    fn selected_file(&self) -> Option<SelectedFile> {
        Some(self.0.clone())
    }
}

struct StderrLabel;

impl ErrorLabel for StderrLabel {
    fn set_text(&mut self, text: &str) {
        if !text.is_empty() {
            eprintln!("❌ {text}");
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn upload(
    file: PathBuf,
    server: Option<String>,
    mime_type: Option<String>,
    config: Option<PathBuf>,
) -> anyhow::Result<bool> {
    let mut config = Config::resolve(config.as_deref())?;
    if let Some(server) = server {
        config.server_url = server;
    }

    let selected = match mime_type {
        Some(mime_type) => SelectedFile::with_mime_type(&file, mime_type),
        None => SelectedFile::from_path(&file),
    };
    println!("Received file: {}", selected.name);

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config)?);
    let pipeline = UploadPipeline::new(transport.clone(), config.upload_path.clone());
    let view = GalleryView::new(transport, config.gallery_path.clone());
    let mut form = UploadForm::init(PathInput(selected), StderrLabel, view, pipeline);

    match form.submit().await? {
        SubmitOutcome::Rejected => Ok(false),
        SubmitOutcome::Uploaded { response } => {
            println!("Server answered {}", response.status);
            if let Some(page) = form.view().page() {
                println!("Gallery reloaded ({} bytes)", page.body.len());
            }
            Ok(true)
        }
    }
}

async fn encode(file: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(&file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let encoded = encode_to_base64(&bytes);
    match output {
        Some(output) => {
            tokio::fs::write(&output, &encoded)
                .await
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Encoded {} bytes into {}", bytes.len(), output.display());
        }
        None => println!("{encoded}"),
    }
    Ok(())
}

async fn decode(payload: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(&payload)
        .await
        .with_context(|| format!("reading {}", payload.display()))?;
    let bytes = decode_from_base64(&text)?;
    tokio::fs::write(&output, &bytes)
        .await
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Decoded {} bytes into {}", bytes.len(), output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ok = match cli.command {
        Command::Upload {
            file,
            server,
            mime_type,
            config,
        } => upload(file, server, mime_type, config).await?,
        Command::Encode { file, output } => {
            encode(file, output).await?;
            true
        }
        Command::Decode { payload, output } => {
            decode(payload, output).await?;
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
