/// Display utilities for terminal output

use colored::{ColoredString, Colorize};

use crate::core::{DataOrigin, HypeSignal, RiskLabel, SignalError};

fn label_badge(label: RiskLabel) -> ColoredString {
    match label {
        RiskLabel::ClownEnergy => format!("🤡 {}", label).red().bold(),
        RiskLabel::WhaleAccumulation => format!("🐋 {}", label).cyan().bold(),
        RiskLabel::Neutral => format!("⚖️  {}", label).green().bold(),
    }
}

pub fn print_hype_signal(token_id: &str, signal: &HypeSignal) {
    println!("\n{} {}", "📡", format!("HYPE METER - {}", token_id).bold());
    println!("{}", "=".repeat(70));
    println!("   Risk Label: {}", label_badge(signal.risk_label));
    println!("   Hype Ratio: {:.4}", signal.ratio);
    println!("   Message: {}", signal.message());
    println!("   Avg Price (norm): {:.4}", signal.details.avg_price_norm);
    println!("   Avg Hype (norm): {:.4}", signal.details.avg_hype_norm);
    println!("   Data Points: {}", signal.details.data_points);
    if signal.origin == DataOrigin::Mock {
        println!("   {}", "No stored observations - mock profile used".dimmed());
    }
    println!("{}", "=".repeat(70));
}

pub fn print_signal_error(token_id: &str, error: &SignalError) {
    println!("\n{} {} - {}", "⚠️", "HYPE METER ERROR".yellow().bold(), token_id.bold());
    println!("   {}", error);
}
