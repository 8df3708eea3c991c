use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use ctrlbox_bridge::{Bridge, BridgeConfig, OscPublisher, SerialDevice, OSC_PREFIX};

/// Republish ctrlbox serial events as OSC messages
#[derive(Parser, Debug)]
#[command(name = "ctrlbox2osc", version, long_about = None)]
struct Cli {
    /// Log every decoded event
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Serial link rate
    #[arg(long)]
    baud: Option<u32>,

    /// Host the OSC messages are sent to
    #[arg(long)]
    host: Option<String>,

    /// UDP port the OSC messages are sent to
    osc_port: Option<u16>,

    /// Serial device path
    serial_device: Option<String>,
}

impl Cli {
    /// Defaults, then the config file, then explicit arguments
    fn resolve(&self) -> Result<BridgeConfig> {
        let mut config = match &self.config {
            Some(path) => BridgeConfig::load(path)?,
            None => BridgeConfig::default(),
        };

        if let Some(port) = self.osc_port {
            config.osc_port = port;
        }
        if let Some(device) = &self.serial_device {
            config.device = device.clone();
        }
        if let Some(host) = &self.host {
            config.osc_host = host.clone();
        }
        if let Some(baud) = self.baud {
            config.baud_rate = baud;
        }
        config.verbose |= self.verbose;

        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve()?;

    init_logging(config.verbose);
    config.log_summary();

    let device = SerialDevice::open(&config.device, &config.uart_config())?;
    info!(
        "Opened serial device {} @ {} baud",
        device.name(),
        config.baud_rate
    );

    let publisher = OscPublisher::new(&config.osc_host, config.osc_port)
        .with_context(|| format!("failed to set up OSC target {}", config.osc_target()))?;
    info!(
        "Sending on osc.udp://{}{}/analog/N (f) and {}/digital/N (i)",
        publisher.target(),
        OSC_PREFIX,
        OSC_PREFIX
    );
    if !config.verbose {
        info!("Use -v to dump values");
    }

    let stats = Bridge::new(device, publisher).run();
    info!(
        "Decoded {} packets ({} stray bytes, {} aborted)",
        stats.packets, stats.discarded, stats.aborted
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["ctrlbox2osc", "9000", "/dev/ttyACM0"]).unwrap();
        let config = cli.resolve().unwrap();
        assert_eq!(config.osc_port, 9000);
        assert_eq!(config.device, "/dev/ttyACM0");
        assert_eq!(config.baud_rate, 500_000);
    }

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["ctrlbox2osc"]).unwrap();
        assert_eq!(cli.resolve().unwrap(), BridgeConfig::default());
    }

    #[test]
    fn test_flags_override() {
        let cli =
            Cli::try_parse_from(["ctrlbox2osc", "-v", "--host", "10.0.0.2", "--baud", "115200"])
                .unwrap();
        let config = cli.resolve().unwrap();
        assert!(config.verbose);
        assert_eq!(config.osc_host, "10.0.0.2");
        assert_eq!(config.baud_rate, 115_200);
    }

    #[test]
    fn test_bad_port_rejected() {
        assert!(Cli::try_parse_from(["ctrlbox2osc", "not-a-port"]).is_err());
    }
}
