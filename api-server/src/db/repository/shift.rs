//! Shift Repository

use super::{BaseRepository, RepoResult};
use shared::models::Shift;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

const SHIFT_FIELDS: &str =
    "<string>id AS id, <string>cashier AS cashier, cashier_name, opened_at, closed_at, status";

#[derive(Clone)]
pub struct ShiftRepository {
    base: BaseRepository,
}

impl ShiftRepository {
    pub fn new(db: Surreal<Client>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 查询所有 ACTIVE 状态的班次
    pub async fn find_active(&self) -> RepoResult<Vec<Shift>> {
        let shifts: Vec<Shift> = self
            .base
            .db()
            .query(format!(
                "SELECT {SHIFT_FIELDS} FROM shift WHERE status = 'ACTIVE' ORDER BY opened_at"
            ))
            .await?
            .take(0)?;
        Ok(shifts)
    }
}
