// src/services/export.rs
use anyhow::Result;
use csv::Writer;
use std::io::Write;

use crate::models::CashFlowEntry;

/// Writes the schedule as `year,amount` rows for spreadsheet use.
pub fn write_cash_flows_csv<W: Write>(writer: W, cash_flows: &[CashFlowEntry]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    for entry in cash_flows {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let mut out = Vec::new();
        let flows = [
            CashFlowEntry { year: 0, amount: -100.0 },
            CashFlowEntry { year: 1, amount: 150.5 },
        ];
        write_cash_flows_csv(&mut out, &flows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "year,amount\n0,-100.0\n1,150.5\n");
    }
}
