use crate::config::PresaleConfig;
use crate::models::presale::PresaleSnapshot;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_header(&self, text: &str) -> String {
        format!("\n=== {} ===", text.bright_white().bold())
    }

    pub fn format_table(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.add_row(Row::new(
            headers.iter().map(|h| Cell::new(h).style_spec("b")).collect(),
        ));

        for row in rows {
            table.add_row(Row::new(row.iter().map(|cell| Cell::new(cell)).collect()));
        }

        table.to_string()
    }

    pub fn format_currency(&self, amount: f64) -> String {
        if amount >= 1.0 {
            format!("${:.2}", amount)
        } else {
            format!("${:.6}", amount)
        }
    }

    pub fn format_eth(&self, amount: f64) -> String {
        format!("{:.4} ETH", amount)
    }

    /// Green once the hard cap is reached, yellow past half, plain below.
    pub fn format_progress(&self, percent: f64) -> String {
        let text = format!("{:.2}%", percent);
        if percent >= 100.0 {
            text.green().bold().to_string()
        } else if percent >= 50.0 {
            text.yellow().to_string()
        } else {
            text
        }
    }

    pub fn format_config(&self, config: &PresaleConfig) -> String {
        let rows = vec![
            vec!["Presale address".to_string(), config.presale_address.clone()],
            vec!["Hard cap".to_string(), self.format_eth(config.hard_cap)],
            vec!["Presale price".to_string(), self.format_currency(config.presale_price_usd)],
            vec!["Public price".to_string(), self.format_currency(config.public_price_usd)],
            vec!["Ends".to_string(), config.presale_end_date.to_rfc3339()],
            vec!["Price API".to_string(), config.price_api_url.clone()],
            vec!["Ethereum RPC".to_string(), config.eth_rpc_url.clone()],
            vec!["Price cache".to_string(), format!("{} ms", config.price_cache_ms)],
            vec!["Balance cache".to_string(), format!("{} ms", config.balance_cache_ms)],
        ];

        let mut output = Vec::new();
        output.push(self.format_header("Presale"));
        output.push(self.format_table(&["Setting", "Value"], &rows));
        output.join("\n")
    }

    pub fn format_snapshot(&self, snapshot: &PresaleSnapshot) -> String {
        let mut output = Vec::new();
        output.push(self.format_header("Presale Stats"));
        output.push(format!(
            "Raised: {} of {} ({})",
            self.format_eth(snapshot.total_raised),
            self.format_eth(snapshot.hard_cap),
            self.format_progress(snapshot.progress_percent())
        ));
        output.push(format!(
            "On-chain balance: {}",
            self.format_eth(snapshot.on_chain_balance_eth)
        ));
        match snapshot.eth_price_usd {
            Some(price) => output.push(format!("ETH price: {}", self.format_currency(price))),
            None => output.push(format!("ETH price: {}", "unavailable".red())),
        }
        if let Some(usd) = snapshot.total_raised_usd() {
            output.push(format!("Raised (USD): {}", self.format_currency(usd)));
        }

        output.join("\n")
    }
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_precision_depends_on_magnitude() {
        let display = DisplayFormatter::new();
        assert_eq!(display.format_currency(3187.456), "$3187.46");
        assert_eq!(display.format_currency(0.0005), "$0.000500");
    }

    #[test]
    fn config_table_lists_presale_terms() {
        let display = DisplayFormatter::new();
        let out = display.format_config(&PresaleConfig::default());
        assert!(out.contains("0xf9ea9da67bb4cb831cf1ed0570ededb070553473"));
        assert!(out.contains("15.0000 ETH"));
        assert!(out.contains("$0.001500"));
    }

    #[test]
    fn snapshot_summary_mentions_missing_price() {
        let display = DisplayFormatter::new();
        let snapshot = PresaleSnapshot {
            total_raised: 1.5,
            hard_cap: 15.0,
            presale_price_usd: 0.0005,
            public_price_usd: 0.0015,
            presale_end_date: crate::config::default_end_date(),
            presale_address: crate::config::PRESALE_ADDRESS.into(),
            eth_price_usd: None,
            on_chain_balance_eth: 0.25,
        };
        let out = display.format_snapshot(&snapshot);
        assert!(out.contains("1.5000 ETH"));
        assert!(out.contains("10.00%"));
        assert!(out.contains("unavailable"));
        assert!(!out.contains("Raised (USD)"));
    }
}
