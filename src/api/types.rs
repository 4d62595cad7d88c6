//! Shared types for the API layer.

use std::collections::HashMap;
use std::sync::Arc;

use crate::portal::Portal;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub portal: Arc<Portal>,
}

impl ApiContext {
    pub fn new(portal: Arc<Portal>) -> Self {
        Self { portal }
    }
}

/// Form submissions arrive as a flat JSON object of field name to value.
pub type FormFields = HashMap<String, String>;
