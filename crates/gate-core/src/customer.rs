//! Customers and their saved gates.

use crate::gate::Gate;
use crate::ids::{CustomerId, GateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact fields of a customer, as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    #[serde(default)]
    pub company: String,
    /// Street and house number.
    #[serde(default)]
    pub address: String,
    /// Postal code and city.
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl CustomerDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A customer with the gates quoted for them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(flatten)]
    pub details: CustomerDetails,
    /// Saved gate snapshots, in the order they were added.
    #[serde(default)]
    pub gates: Vec<Gate>,
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(details: CustomerDetails) -> Self {
        let now = Utc::now();
        Self {
            id: CustomerId::generate(),
            details,
            gates: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Name with the company in parentheses, if there is one.
    pub fn display_name(&self) -> String {
        if self.details.company.trim().is_empty() {
            self.details.name.clone()
        } else {
            format!("{} ({})", self.details.name, self.details.company)
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Replace the contact fields.
    pub fn update(&mut self, details: CustomerDetails) {
        self.details = details;
        self.touch();
    }

    pub fn add_gate(&mut self, gate: Gate) {
        self.gates.push(gate);
        self.touch();
    }

    /// Remove a gate. Returns whether it existed.
    pub fn remove_gate(&mut self, gate_id: &GateId) -> bool {
        match self.gates.iter().position(|g| &g.id == gate_id) {
            Some(index) => {
                self.gates.remove(index);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Replace the snapshot with the same id. Returns whether it existed.
    pub fn update_gate(&mut self, mut gate: Gate) -> bool {
        match self.gates.iter_mut().find(|g| g.id == gate.id) {
            Some(existing) => {
                gate.updated_at = Utc::now();
                *existing = gate;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Update an existing snapshot or append a new one.
    pub fn upsert_gate(&mut self, gate: Gate) {
        if !self.update_gate(gate.clone()) {
            self.add_gate(gate);
        }
    }

    pub fn get_gate(&self, gate_id: &GateId) -> Option<&Gate> {
        self.gates.iter().find(|g| &g.id == gate_id)
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Sum of the VAT-inclusive totals of all saved gates.
    pub fn quoted_total(&self) -> f64 {
        self.gates.iter().map(|g| g.totals.vat_inclusive_total).sum()
    }
}
