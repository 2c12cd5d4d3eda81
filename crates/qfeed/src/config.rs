use clap::Parser;

/// qfeed: equity quote poller → broker relay
#[derive(Parser, Debug)]
#[command(name = "qfeed")]
pub struct Config {
    /// Quote API endpoint
    #[arg(
        long,
        env = "QUOTE_API_ENDPOINT",
        default_value = "https://api.robinhood.com/quotes/"
    )]
    pub api_endpoint: String,

    /// Broker server URL
    #[arg(long, env = "BROKER_URL", default_value = "nats://localhost:4222")]
    pub broker_url: String,

    /// Comma-separated ticker symbols to poll (e.g. AAPL,MSFT,GOOG)
    #[arg(long, env = "EQUITY_WATCHLIST")]
    pub watchlist: String,

    /// Topic to publish quotes to; each symbol lands on {topic}.{symbol}
    #[arg(long, env = "QUOTE_TOPIC")]
    pub topic: String,

    /// Seconds to sleep between poll cycles
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value = "10")]
    pub poll_interval_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from([
            "qfeed",
            "--watchlist",
            "AAPL,MSFT",
            "--topic",
            "quotes",
        ])
        .unwrap();
        assert_eq!(config.api_endpoint, "https://api.robinhood.com/quotes/");
        assert_eq!(config.broker_url, "nats://localhost:4222");
        assert_eq!(config.poll_interval_secs, 10);
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "qfeed",
            "--watchlist",
            "AAPL",
            "--topic",
            "quotes",
            "--poll-interval-secs",
            "5",
            "--broker-url",
            "nats://broker:4222",
        ])
        .unwrap();
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.broker_url, "nats://broker:4222");
    }

    #[test]
    fn test_watchlist_is_required() {
        assert!(Config::try_parse_from(["qfeed", "--topic", "quotes"]).is_err());
    }

    #[test]
    fn test_topic_is_required() {
        assert!(Config::try_parse_from(["qfeed", "--watchlist", "AAPL"]).is_err());
    }
}
