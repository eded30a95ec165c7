use statedge_core::ResolutionRecord;
use statedge_telemetry::{read_jsonl, Paths};
use std::collections::BTreeMap;

fn format_record(record: &ResolutionRecord) -> String {
    let result = match (record.delivered_by(), &record.error) {
        (Some(strategy), _) => format!("delivered by {}", strategy),
        (None, Some(error)) => format!("error: {}", error),
        (None, None) => "not delivered".to_string(),
    };

    format!(
        "{}  #{:<3} {:<8} {:<9} {} attempt(s), {}",
        record.started_at.format("%Y-%m-%d %H:%M:%S"),
        record.click,
        record.tier.as_str(),
        if record.context.embedded {
            "embedded"
        } else {
            "top-level"
        },
        record.attempts.len(),
        result
    )
}

fn format_stats(records: &[ResolutionRecord]) -> String {
    let mut delivered: BTreeMap<&str, usize> = BTreeMap::new();
    let mut errors = 0;
    let mut undelivered = 0;

    for record in records {
        match record.delivered_by() {
            Some(strategy) => *delivered.entry(strategy.as_str()).or_insert(0) += 1,
            None if record.error.is_some() => errors += 1,
            None => undelivered += 1,
        }
    }

    let mut lines = vec![
        format!("Total clicks: {}", records.len()),
        format!("Resolution errors: {}", errors),
        format!("Undelivered: {}", undelivered),
        "Delivered by:".to_string(),
    ];
    for (strategy, count) in delivered {
        lines.push(format!("  {:<20} {}", strategy, count));
    }
    lines.join("\n")
}

pub fn run(stats: bool) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let records: Vec<ResolutionRecord> = read_jsonl(&paths.history_file())?;

    if records.is_empty() {
        println!("No diagnostics recorded yet (statedge simulate --record)");
        return Ok(());
    }

    if stats {
        println!("{}", format_stats(&records));
    } else {
        for record in &records {
            println!("{}", format_record(record));
        }
    }
    Ok(())
}
