//! Improv serial provisioning CLI.
//!
//! Talks the Improv Wi-Fi provisioning protocol to an embedded device over a
//! serial port (or a UART bridged over TCP): scan for networks, query device
//! info and state, and push Wi-Fi credentials.

mod client;
mod error;
mod transport;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use client::ImprovClient;
use error::CliError;

#[derive(Parser)]
#[command(name = "improv")]
#[command(version, about = "Provision Wi-Fi on Improv serial devices", long_about = None)]
struct Args {
    /// Serial device path, or tcp://host:port for a UART bridged over TCP
    #[arg(short = 'd', long)]
    device: String,

    /// Wi-Fi SSID to provision (requires --password)
    #[arg(short = 's', long)]
    ssid: Option<String>,

    /// Wi-Fi password to provision (requires --ssid)
    #[arg(short = 'p', long)]
    password: Option<String>,

    /// Scan for Wi-Fi networks
    #[arg(short = 'S', long)]
    scan: bool,

    /// Get device information
    #[arg(short = 'i', long)]
    info: bool,

    /// Get the current provisioning state
    #[arg(short = 'g', long)]
    get_state: bool,

    /// Serial baud rate
    #[arg(long, default_value_t = 115200)]
    baud: u32,

    /// Read timeout in seconds; also ends a scan once the device goes quiet
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let transport = transport::open(
        &args.device,
        args.baud,
        Duration::from_secs(args.timeout),
    )?;
    let mut client = ImprovClient::new(transport);

    if args.scan {
        client.request_scan()?;
    }
    if args.info {
        client.request_device_info()?;
    }
    if args.get_state {
        client.request_current_state()?;
    }
    if let (Some(ssid), Some(password)) = (&args.ssid, &args.password) {
        client.request_wifi_settings(ssid, password)?;
    }
    Ok(())
}
