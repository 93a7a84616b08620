//! Structured zone record editing on top of the forwarding core.

use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::SharedState;
use crate::error::AppError;
use crate::records::batch::{self, RrsetKey};
use crate::records::codec::{RecordData, RecordType};
use crate::records::name::{ensure_trailing_dot, relative_name};
use crate::records::{RecordForm, ValidationError};

/// List every recognized record set of a zone as editable forms.
pub async fn list_records(
    Extension(state): Extension<SharedState>,
    Path(zone): Path<String>,
) -> Result<Json<Vec<RecordForm>>, AppError> {
    let zone = ensure_trailing_dot(&zone);
    let fetched = state.pdns.get_zone(&state.config.upstream, &zone).await?;

    let mut forms = Vec::new();
    for rrset in fetched.rrsets.unwrap_or_default() {
        // Sets with types outside the editing surface stay reachable
        // through /api/pdns.
        let Some(rtype) = RecordType::parse(&rrset.rtype) else {
            continue;
        };
        let contents: Vec<String> = rrset
            .records
            .iter()
            .map(|record| record.content.clone())
            .collect();
        let disabled = !rrset.records.is_empty() && rrset.records.iter().all(|r| r.disabled);
        forms.push(RecordForm {
            name: relative_name(&rrset.name, &fetched.name),
            ttl: rrset.ttl.unwrap_or_default(),
            disabled,
            data: RecordData::decode(rtype, &contents),
        });
    }

    Ok(Json(forms))
}

/// Save one edited record set: exactly one REPLACE operation.
pub async fn save_record(
    Extension(state): Extension<SharedState>,
    Path(zone): Path<String>,
    Json(form): Json<RecordForm>,
) -> Result<StatusCode, AppError> {
    let zone = ensure_trailing_dot(&zone);
    let op = batch::replace_op(&zone, &form)?;
    state
        .pdns
        .patch_rrsets(&state.config.upstream, &zone, &[op])
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct DeleteRecordsRequest {
    pub rrsets: Vec<RrsetKey>,
}

/// Delete the selected record sets with a single zone patch.
pub async fn delete_records(
    Extension(state): Extension<SharedState>,
    Path(zone): Path<String>,
    Json(req): Json<DeleteRecordsRequest>,
) -> Result<StatusCode, AppError> {
    let zone = ensure_trailing_dot(&zone);
    let ops = batch::delete_ops(&zone, &req.rrsets)?;
    state
        .pdns
        .patch_rrsets(&state.config.upstream, &zone, &ops)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct DeleteZonesRequest {
    pub zones: Vec<String>,
}

#[derive(Serialize)]
pub struct BulkDeleteSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<BulkDeleteFailure>,
}

#[derive(Serialize)]
pub struct BulkDeleteFailure {
    pub zone: String,
    pub detail: String,
}

/// Delete several zones, one upstream call each. A failed unit never
/// aborts the batch; the caller gets an aggregate summary instead.
pub async fn delete_zones(
    Extension(state): Extension<SharedState>,
    Json(req): Json<DeleteZonesRequest>,
) -> Result<Json<BulkDeleteSummary>, AppError> {
    if req.zones.is_empty() {
        return Err(ValidationError::EmptySelection.into());
    }

    let mut summary = BulkDeleteSummary {
        succeeded: 0,
        failed: 0,
        failures: Vec::new(),
    };
    for zone in req.zones {
        let name = ensure_trailing_dot(&zone);
        match state.pdns.delete_zone(&state.config.upstream, &name).await {
            Ok(()) => summary.succeeded += 1,
            Err(err) => {
                summary.failed += 1;
                summary.failures.push(BulkDeleteFailure {
                    zone: name,
                    detail: err.detail_message(),
                });
            }
        }
    }

    Ok(Json(summary))
}
