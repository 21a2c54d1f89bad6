use serde_json::{json, Value};

use crate::errors::VigilError;
use crate::models::FlaggedMessage;
use super::Database;

impl Database {
    /// Append one flagged message. Rows are never mutated afterwards.
    pub fn insert_flagged_message(&self, message: &FlaggedMessage) -> Result<(), VigilError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO flagged_messages (source_handle, text, has_drug_signal, has_geo_signal, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                message.source_handle,
                message.text,
                message.has_drug_signal,
                message.has_geo_signal,
                message.timestamp.to_rfc3339(),
            ],
        ).map_err(|e| VigilError::Database(format!("Failed to insert flagged message: {}", e)))?;
        Ok(())
    }

    /// Flagged messages for the dashboard, newest first, joined with the
    /// source profile for title and risk. Optionally filtered by source.
    pub fn flagged_messages(
        &self,
        source_handle: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Value>, VigilError> {
        let conn = self.conn.lock().unwrap();

        const BASE: &str =
            "SELECT m.id, m.source_handle, m.text, m.has_drug_signal, m.has_geo_signal, m.timestamp,
                    p.title AS source_title, p.risk_score
             FROM flagged_messages m
             LEFT JOIN source_profiles p ON m.source_handle = p.handle
             WHERE m.has_drug_signal = 1";

        let mut results = Vec::new();
        match source_handle {
            Some(handle) => {
                let sql = format!("{} AND m.source_handle = ?1 ORDER BY m.timestamp DESC LIMIT ?2", BASE);
                let mut stmt = conn
                    .prepare(&sql)
                    .map_err(|e| VigilError::Database(format!("Query failed: {}", e)))?;
                let rows = stmt
                    .query_map(rusqlite::params![handle, limit as i64], message_row_json)
                    .map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;
                for row in rows {
                    results.push(row.map_err(|e| VigilError::Database(format!("Row error: {}", e)))?);
                }
            }
            None => {
                let sql = format!("{} ORDER BY m.timestamp DESC LIMIT ?1", BASE);
                let mut stmt = conn
                    .prepare(&sql)
                    .map_err(|e| VigilError::Database(format!("Query failed: {}", e)))?;
                let rows = stmt
                    .query_map(rusqlite::params![limit as i64], message_row_json)
                    .map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;
                for row in rows {
                    results.push(row.map_err(|e| VigilError::Database(format!("Row error: {}", e)))?);
                }
            }
        }
        Ok(results)
    }

    pub fn count_flagged_messages(&self, source_handle: &str) -> Result<i64, VigilError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT COUNT(*) FROM flagged_messages WHERE source_handle = ?1",
            rusqlite::params![source_handle],
            |r| r.get(0),
        )
        .map_err(|e| VigilError::Database(format!("Query error: {}", e)))
    }
}

fn message_row_json(row: &rusqlite::Row) -> rusqlite::Result<Value> {
    let has_drugs: bool = row.get(3)?;
    let has_geo: bool = row.get(4)?;
    let mut triggers = Vec::new();
    if has_drugs {
        triggers.push("drugs");
    }
    if has_geo {
        triggers.push("kz_geo");
    }
    Ok(json!({
        "id": row.get::<_, i64>(0)?,
        "source_handle": row.get::<_, Option<String>>(1)?,
        "text": row.get::<_, String>(2)?,
        "has_drug_signal": has_drugs,
        "has_geo_signal": has_geo,
        "timestamp": row.get::<_, String>(5)?,
        "source_title": row.get::<_, Option<String>>(6)?,
        "risk_score": row.get::<_, Option<f64>>(7)?.unwrap_or(0.0),
        "triggers": triggers.join(", "),
    }))
}
