//! Carbon Footprint API Library
//!
//! This library estimates a person's monthly CO2 footprint from a lifestyle
//! questionnaire and produces prioritized reduction advice. A remote
//! predictor is preferred; any failure degrades to the local estimator.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Estimation and recommendation logic.
//! - `integrations`: Remote predictor integration.
//! - `circuit_breaker`: Circuit breaker for the predictor.
//! - `config`: Configuration management.
//! - `display_data`: Population statistics for comparison views.
//! - `emission_model`: Emission factor tables.
//! - `errors`: Error handling types.
//! - `estimator`: Local footprint estimate.
//! - `handlers`: HTTP request handlers.
//! - `models`: Questionnaire and result models.
//! - `orchestrator`: Remote-first, local-fallback orchestration.
//! - `predictor_client`: Remote predictor client.
//! - `recommendations`: Rule-based advice.

pub mod api;
pub mod core;
pub mod integrations;

pub mod circuit_breaker;
pub mod config;
pub mod display_data;
pub mod emission_model;
pub mod errors;
pub mod estimator;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod predictor_client;
pub mod recommendations;
