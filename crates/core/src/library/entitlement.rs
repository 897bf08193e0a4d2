//! Entitlement persistence.
//!
//! The entitlement table holds a single row (id = 1). A missing row
//! reads back as the default free plan, so a fresh database never
//! needs seeding.

use super::connection::LibraryDb;
use crate::Error;
use crate::record::{Entitlement, Plan};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

impl LibraryDb {
    /// Read the stored entitlement, or the free default when none exists.
    pub async fn get_entitlement(&self) -> Result<Entitlement, Error> {
        self.conn
            .call(|conn| -> Result<Entitlement, Error> {
                let result = conn.query_row(
                    "SELECT plan, license_key, email, activated_at, pending_session_id
                     FROM entitlement WHERE id = 1",
                    [],
                    |row| {
                        Ok(Entitlement {
                            plan: Plan::parse(&row.get::<_, String>(0)?),
                            license_key: row.get(1)?,
                            email: row.get(2)?,
                            activated_at: row.get(3)?,
                            pending_session_id: row.get(4)?,
                        })
                    },
                );

                match result {
                    Ok(e) => Ok(e),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Entitlement::default()),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Write the entitlement, replacing whatever was stored before.
    pub async fn set_entitlement(&self, entitlement: &Entitlement) -> Result<(), Error> {
        let entitlement = entitlement.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO entitlement (
                        id, plan, license_key, email, activated_at, pending_session_id
                    ) VALUES (1, ?1, ?2, ?3, ?4, ?5)
                    ON CONFLICT(id) DO UPDATE SET
                        plan = excluded.plan,
                        license_key = excluded.license_key,
                        email = excluded.email,
                        activated_at = excluded.activated_at,
                        pending_session_id = excluded.pending_session_id",
                    params![
                        entitlement.plan.as_str(),
                        &entitlement.license_key,
                        &entitlement.email,
                        &entitlement.activated_at,
                        &entitlement.pending_session_id,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}
