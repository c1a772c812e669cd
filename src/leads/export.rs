//! CSV export of the lead list.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::database::models::Lead;

const HEADER: &str = "createdAt,name,phone,email,message,source";

fn cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render leads as CSV with every cell quoted. Always ends with a newline.
pub fn leads_to_csv(leads: &[Lead]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for lead in leads {
        let row = [
            lead.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            lead.name.clone(),
            lead.phone.clone(),
            lead.email.clone().unwrap_or_default(),
            lead.message.clone(),
            lead.source.clone().unwrap_or_default(),
        ];
        let line: Vec<String> = row.iter().map(|v| cell(v)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// `leads_YYYYMMDD_HHMM.csv` in UTC.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("leads_{}.csv", now.format("%Y%m%d_%H%M"))
}
