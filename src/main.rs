//! `precis` binary: HTTP server and file-to-file summarization.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use precis::config::{ModelConfig, ServerConfig, DEFAULT_ADDR, DEFAULT_MAX_BODY_BYTES};
use precis::{
    ChunkWindow, Summarizer, SummarizerOptions, SummaryLength, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL, DEFAULT_OVERLAP, DEFAULT_SUMMARY_MAX_TOKENS, DEFAULT_SUMMARY_MIN_TOKENS,
};

const SAMPLE_TEXT: &str = "The Apollo program was the third United States human spaceflight \
program carried out by NASA, which succeeded in preparing and landing the first humans on the \
Moon from 1968 to 1972. It was first conceived during Dwight D. Eisenhower's administration as \
a three-person spacecraft to follow the one-person Project Mercury, which put the first \
Americans in space. Apollo was later dedicated to President John F. Kennedy's national goal of \
landing a man on the Moon and returning him safely to the Earth by the end of the 1960s.";

#[derive(Parser)]
#[command(name = "precis")]
#[command(version, about = "Chunked abstractive summarization over HTTP")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    model: ModelArgs,

    #[command(flatten)]
    pipeline: PipelineArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve POST /summarize, POST /upload and GET /
    Serve {
        /// Address to listen on
        #[arg(long, env = "PRECIS_ADDR", default_value = DEFAULT_ADDR)]
        addr: SocketAddr,

        /// Request body cap in bytes
        #[arg(long, env = "PRECIS_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
        max_body_bytes: usize,
    },
    /// Summarize a file to a file, plus an inline text, and print both
    File {
        /// UTF-8 input file
        #[arg(short, long, default_value = "input.txt")]
        input: PathBuf,

        /// Output file, written with a "Summary:" header line
        #[arg(short, long, default_value = "summary.txt")]
        output: PathBuf,

        /// Inline text summarized alongside the file
        #[arg(long, default_value = SAMPLE_TEXT)]
        text: String,
    },
}

#[derive(Args)]
struct ModelArgs {
    /// Hub model id for the tokenizer and the inference endpoint
    #[arg(long, global = true, env = "PRECIS_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Local tokenizer.json instead of downloading from the Hub
    #[arg(long, global = true, env = "PRECIS_TOKENIZER")]
    tokenizer: Option<PathBuf>,

    /// Inference base URL; the model id is appended
    #[arg(long, global = true, env = "PRECIS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Hugging Face access token
    #[arg(long, global = true, env = "HF_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
}

#[derive(Args)]
struct PipelineArgs {
    /// Tokens per chunk
    #[arg(long, global = true, env = "PRECIS_CHUNK_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    chunk_tokens: usize,

    /// Tokens shared by consecutive chunks
    #[arg(long, global = true, env = "PRECIS_OVERLAP", default_value_t = DEFAULT_OVERLAP)]
    overlap: usize,

    /// Minimum summary tokens per chunk
    #[arg(long, global = true, default_value_t = DEFAULT_SUMMARY_MIN_TOKENS)]
    min_summary: usize,

    /// Maximum summary tokens per chunk
    #[arg(long, global = true, default_value_t = DEFAULT_SUMMARY_MAX_TOKENS)]
    max_summary: usize,

    /// Chunk summaries requested concurrently
    #[arg(long, global = true, env = "PRECIS_CONCURRENCY", default_value_t = 1)]
    concurrency: usize,
}

impl PipelineArgs {
    fn options(&self) -> Result<SummarizerOptions> {
        Ok(SummarizerOptions {
            window: ChunkWindow::new(self.chunk_tokens, self.overlap)
                .context("Invalid chunk window")?,
            length: SummaryLength::new(self.min_summary, self.max_summary)
                .context("Invalid summary length")?,
            concurrency: self.concurrency,
        })
    }
}

impl From<ModelArgs> for ModelConfig {
    fn from(args: ModelArgs) -> Self {
        Self {
            model: args.model,
            tokenizer_path: args.tokenizer,
            endpoint: args.endpoint,
            api_token: args.api_token,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "precis=debug,tower_http=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn load(model: ModelConfig, options: SummarizerOptions) -> Result<Arc<Summarizer>> {
    let summarizer = tokio::task::spawn_blocking(move || model.load(options))
        .await
        .context("Model loading task panicked")?
        .context("Failed to load model handles")?;
    Ok(Arc::new(summarizer))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Validate before any download or tokenization.
    let options = cli.pipeline.options()?;
    let summarizer = load(cli.model.into(), options).await?;

    match cli.command {
        Commands::Serve {
            addr,
            max_body_bytes,
        } => {
            let config = ServerConfig {
                addr,
                max_body_bytes,
            };
            precis::server::serve(summarizer, &config)
                .await
                .with_context(|| format!("Server error on {addr}"))?;
        }
        Commands::File {
            input,
            output,
            text,
        } => {
            let report =
                precis::file::summarize_file_and_text(&summarizer, &input, &output, &text)
                    .await
                    .with_context(|| format!("Failed to summarize {}", input.display()))?;
            println!("{report}");
        }
    }

    Ok(())
}
