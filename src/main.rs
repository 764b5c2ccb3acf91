use std::error::Error;

use triage::{BasicValidator, Classifier, Format, Importer, InMemoryStore};

const SAMPLE_BATCH: &str = "\
customer_id,customer_email,customer_name,subject,description,status
CUST-001,maria@example.com,Maria,Cannot login to my account,I've been locked out after 3 failed login attempts. Password reset not working.,open
CUST-002,devon@example.com,Devon,Feature request: dark mode,It would be nice to have a dark mode option,open
CUST-003,not-an-email,Sam,Slow dashboards,Performance is degraded since Monday,open
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut importer = Importer::new(
        InMemoryStore::new(),
        BasicValidator,
        Classifier::with_defaults(),
    );

    let summary = importer.import(SAMPLE_BATCH.as_bytes(), Format::Csv, true)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    for record in importer.store().records() {
        match &record.classification {
            Some(attachment) => println!(
                "{} -> {} / {} ({:.2}) :: {}",
                record.id,
                attachment.result.category,
                attachment.result.priority,
                attachment.result.overall_confidence,
                record.subject,
            ),
            None => println!("{} -> unclassified :: {}", record.id, record.subject),
        }
    }

    Ok(())
}
