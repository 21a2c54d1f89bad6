use serde_json::{json, Value};

use crate::errors::VigilError;
use crate::models::{SourceKind, SourceProfile};
use super::Database;

impl Database {
    /// Upsert a source profile on its unique handle. Called every time a
    /// source is analyzed; the fresh sample overwrites the previous row.
    pub fn upsert_profile(&self, profile: &SourceProfile) -> Result<(), VigilError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO source_profiles
             (handle, title, member_count, geo_ratio, risk_score, discovery_method, description, kind, last_checked)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                profile.handle,
                profile.title,
                profile.member_count,
                profile.geo_ratio,
                profile.risk_score,
                profile.discovery_method,
                profile.description,
                profile.kind.as_str(),
                profile.last_checked.to_rfc3339(),
            ],
        ).map_err(|e| VigilError::Database(format!("Failed to upsert profile: {}", e)))?;
        Ok(())
    }

    pub fn get_profile(&self, handle: &str) -> Result<Option<Value>, VigilError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT handle, title, member_count, geo_ratio, risk_score, discovery_method, description, kind, last_checked, is_active FROM source_profiles WHERE handle = ?1"
        ).map_err(|e| VigilError::Database(format!("Query failed: {}", e)))?;

        let result = stmt.query_row(rusqlite::params![handle], profile_row_json);
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(VigilError::Database(format!("Query error: {}", e))),
        }
    }

    /// Active sources ordered by descending risk, bounded.
    pub fn top_sources(&self, limit: usize) -> Result<Vec<Value>, VigilError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT handle, title, member_count, geo_ratio, risk_score, discovery_method, description, kind, last_checked, is_active
             FROM source_profiles WHERE is_active = TRUE ORDER BY risk_score DESC LIMIT ?1"
        ).map_err(|e| VigilError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![limit as i64], profile_row_json)
            .map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;
        collect_rows(rows)
    }

    /// Active sources of one kind (or all kinds), risk-descending.
    pub fn sources_by_kind(&self, kind: Option<SourceKind>) -> Result<Vec<Value>, VigilError> {
        let conn = self.conn.lock().unwrap();
        match kind {
            Some(kind) => {
                let mut stmt = conn.prepare(
                    "SELECT handle, title, member_count, geo_ratio, risk_score, discovery_method, description, kind, last_checked, is_active
                     FROM source_profiles WHERE kind = ?1 AND is_active = TRUE ORDER BY risk_score DESC"
                ).map_err(|e| VigilError::Database(format!("Query failed: {}", e)))?;
                let rows = stmt.query_map(rusqlite::params![kind.as_str()], profile_row_json)
                    .map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;
                collect_rows(rows)
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT handle, title, member_count, geo_ratio, risk_score, discovery_method, description, kind, last_checked, is_active
                     FROM source_profiles WHERE is_active = TRUE ORDER BY risk_score DESC"
                ).map_err(|e| VigilError::Database(format!("Query failed: {}", e)))?;
                let rows = stmt.query_map([], profile_row_json)
                    .map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;
                collect_rows(rows)
            }
        }
    }

    /// Aggregate stats by source kind plus overall totals. High risk is
    /// a score of 0.7 or above.
    pub fn source_stats(&self) -> Result<Value, VigilError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT kind, COUNT(*) as count,
                    AVG(risk_score) as avg_risk,
                    SUM(CASE WHEN risk_score >= 0.7 THEN 1 ELSE 0 END) as high_risk_count
             FROM source_profiles WHERE is_active = TRUE GROUP BY kind"
        ).map_err(|e| VigilError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], |row: &rusqlite::Row| {
            Ok((
                row.get::<_, String>(0)?,
                json!({
                    "count": row.get::<_, i64>(1)?,
                    "avg_risk": row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                    "high_risk_count": row.get::<_, i64>(3)?,
                }),
            ))
        }).map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;

        let mut by_kind = serde_json::Map::new();
        for row in rows {
            let (kind, stats) = row.map_err(|e| VigilError::Database(format!("Row error: {}", e)))?;
            by_kind.insert(kind, stats);
        }

        let total_active: i64 = conn
            .query_row("SELECT COUNT(*) FROM source_profiles WHERE is_active = TRUE", [], |r| r.get(0))
            .map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;
        let total_high_risk: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM source_profiles WHERE risk_score >= 0.7 AND is_active = TRUE",
                [],
                |r| r.get(0),
            )
            .map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;

        Ok(json!({
            "by_kind": Value::Object(by_kind),
            "total_active": total_active,
            "total_high_risk": total_high_risk,
        }))
    }
}

fn profile_row_json(row: &rusqlite::Row) -> rusqlite::Result<Value> {
    Ok(json!({
        "handle": row.get::<_, Option<String>>(0)?,
        "title": row.get::<_, Option<String>>(1)?,
        "member_count": row.get::<_, i64>(2)?,
        "geo_ratio": row.get::<_, f64>(3)?,
        "risk_score": row.get::<_, f64>(4)?,
        "discovery_method": row.get::<_, Option<String>>(5)?,
        "description": row.get::<_, Option<String>>(6)?,
        "kind": row.get::<_, String>(7)?,
        "last_checked": row.get::<_, Option<String>>(8)?,
        "is_active": row.get::<_, bool>(9)?,
    }))
}

fn collect_rows(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row) -> rusqlite::Result<Value>>,
) -> Result<Vec<Value>, VigilError> {
    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| VigilError::Database(format!("Row error: {}", e)))?);
    }
    Ok(results)
}
