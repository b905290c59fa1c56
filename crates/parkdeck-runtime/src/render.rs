//! Pure table formatting for the terminal surface. No IO here, separated
//! for testability.

use chrono::{DateTime, Utc};

use parkdeck_core::{ApiError, AsyncData, SessionRecord};

const COL_VEHICLE: usize = 20;
const COL_COLOR: usize = 8;
const COL_PLATE: usize = 12;
const COL_TIME: usize = 16;

/// Render the merged view for one screen refresh.
pub fn render_view(
    view: &AsyncData<Vec<SessionRecord>, ApiError>,
    last_updated: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> String {
    let body = view.as_ref().fold(
        String::new,
        |previous, delayed| match previous {
            Some(records) => {
                let note = if delayed {
                    "(refresh is taking longer than usual)"
                } else {
                    "(refreshing)"
                };
                format!("{}\n{note}", format_table(records, now))
            }
            None => "Loading parking sessions".to_string(),
        },
        |records| format_table(records, now),
        |error| format!("Error: {error}"),
    );

    match last_updated {
        Some(ts) => format!("{body}\nlast updated {}", format_time(ts, now)),
        None => body,
    }
}

/// Header plus one row per session. Empty input gets the placeholder line.
pub fn format_table(records: &[SessionRecord], now: DateTime<Utc>) -> String {
    if records.is_empty() {
        return "No parking sessions for the given criteria".to_string();
    }

    let mut out = format!(
        "{:<COL_VEHICLE$} {:<COL_COLOR$} {:<COL_PLATE$} {:<COL_TIME$} {:<COL_TIME$} {}",
        "VEHICLE", "COLOR", "PLATE", "TIME IN", "TIME OUT", "DURATION"
    );
    for record in records {
        out.push('\n');
        out.push_str(&format_row(record, now));
    }
    out
}

fn format_row(record: &SessionRecord, now: DateTime<Utc>) -> String {
    let meta = record.session.metadata.as_ref();
    let vehicle = meta
        .map(|m| {
            let make = m.make.as_deref().unwrap_or("");
            let model = m.model.as_deref().unwrap_or("");
            format!("{make} {model}").trim().to_string()
        })
        .unwrap_or_default();
    let color = meta.and_then(|m| m.color.as_deref()).unwrap_or("");
    let plate = meta
        .map(|m| format!("{} {}", m.license_plate.number, m.license_plate.state))
        .unwrap_or_default();

    let time_in = format_time(record.time_in(), now);
    let time_out = record
        .time_out()
        .map(|t| format_time(t, now))
        .unwrap_or_else(|| "active".to_string());
    let duration = format_duration(record.time_in(), record.time_out().unwrap_or(now));

    format!(
        "{vehicle:<COL_VEHICLE$} {color:<COL_COLOR$} {plate:<COL_PLATE$} {time_in:<COL_TIME$} {time_out:<COL_TIME$} {duration}"
    )
}

/// Clock time for today, clock time plus date otherwise.
pub fn format_time(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if time.date_naive() == now.date_naive() {
        time.format("%I:%M%p").to_string()
    } else {
        time.format("%I:%M%p %b %e").to_string()
    }
}

/// Elapsed time as `Nm` under an hour, `Nh Mm` above.
pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let minutes = (end - start).num_minutes().max(0);
    if minutes < 60 {
        format!("{minutes}m")
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
