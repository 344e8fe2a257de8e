use clap::Parser;
use futures::future::join_all;
use std::time::{Duration, Instant};

use gif_upload::encode::encode_to_base64;

/// Times the base64 encoder against the base64 crate, then, when
/// --server is given, fires concurrent uploads at <URL>/gif.
#[derive(Parser)]
#[command(name = "performance")]
struct Args {
    /// Input size in bytes
    #[arg(long, default_value_t = 1024 * 1024)]
    size: usize,
    /// Encode runs per timing
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,
    /// Gallery server base URL
    #[arg(long)]
    server: Option<String>,
    /// Concurrent uploads to fire at the server
    #[arg(long, default_value_t = 10)]
    uploads: usize,
}

fn time<F: FnMut() -> String>(iterations: u32, mut f: F) -> (Duration, String) {
    let start = Instant::now();
    let mut last = String::new();
    for _ in 0..iterations {
        last = f();
    }
    (start.elapsed() / iterations, last)
}

fn mib_per_sec(bytes: usize, per_iter: Duration) -> f64 {
    bytes as f64 / (1024.0 * 1024.0) / per_iter.as_secs_f64().max(f64::EPSILON)
}

async fn upload_burst(server: &str, payload: String, uploads: usize) {
    let client = reqwest::Client::new();
    let url = format!("{}/gif", server.trim_end_matches('/'));
    let start = Instant::now();
    let requests = (0..uploads).map(|_| {
        let request = client.post(&url).body(payload.clone());
        async move {
            let sent = Instant::now();
            let status = request.send().await.map(|r| r.status().as_u16());
            (status, sent.elapsed())
        }
    });
    let results = join_all(requests).await;
    let total = start.elapsed();

    let ok = results.iter().filter(|(s, _)| matches!(s, Ok(200..=299))).count();
    let slowest = results.iter().map(|(_, d)| *d).max().unwrap_or_default();
    println!("Uploads: {ok}/{uploads} succeeded in {total:?} (slowest {slowest:?})");
    for (status, _) in &results {
        if let Err(e) = status {
            println!("  failed: {e}");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let data: Vec<u8> = (0..args.size).map(|i| (i * 31 % 251) as u8).collect();

    let (ours, encoded) = time(args.iterations, || encode_to_base64(&data));
    let (reference, expected) = time(args.iterations, || base64::encode(&data));
    assert_eq!(encoded, expected, "encoder disagrees with the base64 crate");

    println!("Input: {} bytes, crc32 {:08x}", data.len(), crc32fast::hash(&data));
    println!(
        "encode_to_base64: {:?}/iter ({:.1} MiB/s)",
        ours,
        mib_per_sec(data.len(), ours)
    );
    println!(
        "base64::encode:   {:?}/iter ({:.1} MiB/s)",
        reference,
        mib_per_sec(data.len(), reference)
    );

    if let Some(server) = args.server {
        upload_burst(&server, encoded, args.uploads).await;
    }
}
