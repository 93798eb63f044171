//! Lead endpoints
//!
//! Open CRUD and filtering under `/api/leadsdata` and `/api/lead`, plus
//! token-scoped views (`/api/user/leadsdata`, `/api/user/followUp`,
//! `/api/leads/missed`) that match leads against the authenticated user's
//! login name.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Message;
use crate::http::error::ApiError;
use crate::http::extractors::AuthUser;
use crate::models::{validation, Lead, LeadFilter, NewLead, ValidationError};
use crate::state::AppState;

/// Create / overwrite request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub store_name: Option<String>,
    pub store_type: Option<String>,
    pub store_location: Option<String>,
    pub contact_no: Option<String>,
    pub employee_name: Option<String>,
    pub status: Option<String>,
    pub remark: Option<String>,
    pub follow_up_date: Option<DateTime<Utc>>,
}

impl LeadPayload {
    fn into_new_lead(self) -> Result<NewLead, ValidationError> {
        Ok(NewLead {
            store_name: validation::require("storeName", self.store_name)?,
            store_type: validation::require("storeType", self.store_type)?,
            store_location: validation::require("storeLocation", self.store_location)?,
            contact_no: validation::require("contactNo", self.contact_no)?,
            employee_name: validation::require("employeeName", self.employee_name)?,
            status: validation::require("status", self.status)?,
            remark: self.remark,
            follow_up_date: self.follow_up_date.ok_or(ValidationError::Empty {
                field: "followUpDate",
            })?,
        })
    }
}

/// Lead response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub id: i64,
    pub store_name: String,
    pub store_type: String,
    pub store_location: String,
    pub contact_no: String,
    pub employee_name: String,
    pub status: String,
    pub remark: Option<String>,
    pub follow_up_date: DateTime<Utc>,
    pub is_followed_up: bool,
}

impl From<Lead> for LeadResponse {
    fn from(l: Lead) -> Self {
        Self {
            id: l.id,
            store_name: l.store_name,
            store_type: l.store_type,
            store_location: l.store_location,
            contact_no: l.contact_no,
            employee_name: l.employee_name,
            status: l.status,
            remark: l.remark,
            follow_up_date: l.follow_up_date,
            is_followed_up: l.is_followed_up,
        }
    }
}

fn to_responses(leads: Vec<Lead>) -> Json<Vec<LeadResponse>> {
    Json(leads.into_iter().map(LeadResponse::from).collect())
}

/// Optional substring filters for GET /api/leadsdata
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadQuery {
    pub store_location: Option<String>,
    /// Employee-name substring; the field name is the original client's
    pub user_input: Option<String>,
}

/// Response for POST /api/lead
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadResponse {
    pub message: &'static str,
    pub lead_id: i64,
}

/// Follow-up toggle request for POST /api/leadUpdate/followUp
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpPayload {
    pub lead_id: Option<i64>,
    #[serde(default)]
    pub is_followed_up: bool,
}

/// GET /api/leadsdata - list leads, optionally filtered
async fn list_leads(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeadQuery>,
) -> Result<Json<Vec<LeadResponse>>, ApiError> {
    let filter = LeadFilter::new(query.store_location, query.user_input);
    let leads = state.store.list_leads(&filter).await?;
    Ok(to_responses(leads))
}

/// GET /api/leadsdata/{id} - fetch one lead
async fn get_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<LeadResponse>, ApiError> {
    let lead = state.store.get_lead(id).await?;
    Ok(Json(lead.into()))
}

/// POST /api/lead - create a lead
async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LeadPayload>,
) -> Result<(StatusCode, Json<CreateLeadResponse>), ApiError> {
    let new_lead = req.into_new_lead()?;
    let lead_id = state.store.create_lead(&new_lead).await?;
    tracing::info!(lead_id, employee = %new_lead.employee_name, "created lead");

    Ok((
        StatusCode::CREATED,
        Json(CreateLeadResponse {
            message: "lead added successfully",
            lead_id,
        }),
    ))
}

/// PUT /api/lead/{id} - full overwrite
async fn update_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<LeadPayload>,
) -> Result<Json<Message>, ApiError> {
    let lead = req.into_new_lead()?;
    state.store.update_lead(id, &lead).await?;
    Ok(Json(Message {
        message: "lead updated successfully",
    }))
}

/// DELETE /api/lead/{id}
async fn delete_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    state.store.delete_lead(id).await?;
    Ok(Json(Message {
        message: "lead deleted successfully",
    }))
}

/// POST /api/leadUpdate/followUp - toggle the follow-up flag
async fn update_follow_up(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FollowUpPayload>,
) -> Result<Json<Message>, ApiError> {
    let lead_id = req
        .lead_id
        .ok_or(ValidationError::Empty { field: "leadId" })?;
    state.store.set_followed_up(lead_id, req.is_followed_up).await?;
    Ok(Json(Message {
        message: "follow-up updated successfully",
    }))
}

/// GET /api/user/leadsdata - leads assigned to the token's user
async fn my_leads(
    State(state): State<Arc<AppState>>,
    AuthUser(username): AuthUser,
) -> Result<Json<Vec<LeadResponse>>, ApiError> {
    let leads = state.store.leads_for_employee(&username).await?;
    Ok(to_responses(leads))
}

/// GET /api/user/followUp - leads due for follow-up today
async fn follow_ups_due(
    State(state): State<Arc<AppState>>,
    AuthUser(username): AuthUser,
) -> Result<Json<Vec<LeadResponse>>, ApiError> {
    let leads = state.store.follow_ups_due_today(&username).await?;
    Ok(to_responses(leads))
}

/// GET /api/leads/missed - overdue leads not yet followed up
async fn missed_leads(
    State(state): State<Arc<AppState>>,
    AuthUser(username): AuthUser,
) -> Result<Json<Vec<LeadResponse>>, ApiError> {
    let leads = state.store.missed_follow_ups(&username).await?;
    Ok(to_responses(leads))
}

/// Lead routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/leadsdata", get(list_leads))
        .route("/api/leadsdata/{id}", get(get_lead))
        .route("/api/lead", post(create_lead))
        .route("/api/lead/{id}", put(update_lead).delete(delete_lead))
        .route("/api/leadUpdate/followUp", post(update_follow_up))
        .route("/api/user/leadsdata", get(my_leads))
        .route("/api/user/followUp", get(follow_ups_due))
        .route("/api/leads/missed", get(missed_leads))
}
