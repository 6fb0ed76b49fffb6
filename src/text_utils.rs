use chrono::{Datelike, NaiveDate};

const MONTHS_PT: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Article date stamps use the short pt-BR form the launch feed ships with,
/// e.g. "09 Dez".
pub fn short_date_pt(date: NaiveDate) -> String {
    let month = MONTHS_PT[date.month0() as usize];
    format!("{:02} {}", date.day(), month)
}

pub fn today_short_pt() -> String {
    short_date_pt(chrono::Utc::now().date_naive())
}
