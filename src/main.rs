use anyhow::Result;
use std::env;
use std::path::PathBuf;

use sales_report::{
    compute_summary, format_summary, load_records, render_document, to_table, MailTransport,
    Message, PriceFormat, SmtpRelay,
};

const SENDER: &str = "automation@example.com";
const RECIPIENT: &str = "sales@example.com";
const REPORT_TITLE: &str = "Sales summary";
const SUBJECT: &str = "Sales summary for last month";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Input path is the one optional positional argument
    let input_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("car_sales.json")
    };

    println!("🚗 Car Sales Report - JSON → HTML + Email");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load records
    println!("\n📂 Loading sales records...");
    let records = load_records(&input_path)?;
    println!("✓ Loaded {} records from {}", records.len(), input_path.display());

    // 2. Aggregate
    println!("\n📊 Computing summary...");
    let prices = PriceFormat::usd();
    let summary = compute_summary(&records, &prices)?;
    let lines = format_summary(&summary, &prices);
    for line in &lines {
        println!("  {}", line);
    }

    // 3. Render document
    println!("\n📄 Rendering document...");
    let document_path = input_path.with_file_name("car_sales_summary.html");
    let table = to_table(&records);
    render_document(&document_path, REPORT_TITLE, &lines.join("<br/>"), &table)?;
    println!("✓ Document written to {}", document_path.display());

    // 4. Email the report (attachment = the document just rendered)
    println!("\n📧 Sending email...");
    let message = Message::build(SENDER, RECIPIENT, SUBJECT, &lines.join("\n"), &document_path)?;
    SmtpRelay::localhost().deliver(&message)?;
    println!("✓ Report emailed to {}", RECIPIENT);

    println!("\n🎉 Done");

    Ok(())
}
