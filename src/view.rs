use std::io::{self, Write};

use crate::data::model::{ChemicalRecord, Field};
use crate::data::predicates::Category;
use crate::session::{SearchResult, Session};

const MISSING: &str = "—";

// ---------------------------------------------------------------------------
// Result list
// ---------------------------------------------------------------------------

/// Print a filter result as a tab-separated table.
///
/// The first column is the position within this result, which is what
/// `--detail` takes.
pub fn write_result<W: Write>(out: &mut W, session: &Session, result: &SearchResult) -> io::Result<()> {
    let (title, indices) = match result {
        SearchResult::NoData => {
            let msg = session.status_message.as_deref().unwrap_or("No data loaded.");
            return writeln!(out, "{msg}");
        }
        SearchResult::EnterSearchTerm => return writeln!(out, "Enter a search term"),
        SearchResult::Rows { title, indices } => (title, indices),
    };

    writeln!(out, "{title}")?;
    if indices.is_empty() {
        return writeln!(out, "No results.");
    }

    let header: Vec<&str> = Field::LIST_COLUMNS.iter().map(|f| f.label()).collect();
    writeln!(out, "#\t{}", header.join("\t"))?;

    for (pos, &idx) in indices.iter().enumerate() {
        let Some(rec) = session.dataset().records.get(idx) else {
            continue;
        };
        let cells: Vec<&str> = Field::LIST_COLUMNS
            .iter()
            .map(|f| match (f, rec.get(*f)) {
                (Field::TradeName, "") => MISSING,
                (_, v) => v,
            })
            .collect();
        writeln!(out, "{pos}\t{}", cells.join("\t"))?;
    }
    writeln!(out, "{} result(s)", indices.len())
}

// ---------------------------------------------------------------------------
// Detail view
// ---------------------------------------------------------------------------

/// Print every canonical field of one record, then its raw row as JSON.
pub fn write_detail<W: Write>(out: &mut W, record: &ChemicalRecord) -> io::Result<()> {
    let title = if record.trade_name.is_empty() {
        MISSING
    } else {
        record.trade_name.as_str()
    };
    writeln!(out, "{title}")?;
    for field in Field::ALL.iter().skip(1) {
        let value = record.get(*field);
        let value = if value.is_empty() { MISSING } else { value };
        writeln!(out, "  {:<24}{value}", field.label())?;
    }
    writeln!(out)?;
    writeln!(out, "Raw data")?;
    let raw = serde_json::to_string_pretty(&record.raw).map_err(io::Error::other)?;
    writeln!(out, "{raw}")
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

pub fn write_categories<W: Write>(out: &mut W) -> io::Result<()> {
    for c in Category::ALL {
        writeln!(out, "{:<14}{}", c.name(), c.title())?;
    }
    Ok(())
}

pub fn write_fields<W: Write>(out: &mut W) -> io::Result<()> {
    for f in Field::ALL {
        writeln!(out, "{:<22}{}", f.key(), f.label())?;
    }
    Ok(())
}
