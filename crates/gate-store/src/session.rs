//! Editing session over the customer list.
//!
//! A [`QuoteSession`] owns the loaded customers, the selected customer, the
//! gate being edited and the store. Every mutation persists the whole list
//! and then notifies subscribers synchronously.

use crate::debounce::Debouncer;
use crate::store::{export_json, parse_customers, CustomerStore};
use crate::StoreError;
use gate_core::catalog::{Catalog, GateType};
use gate_core::customer::{Customer, CustomerDetails};
use gate_core::gate::Gate;
use gate_core::ids::{CustomerId, GateId};
use gate_core::pricing::{QuoteBreakdown, QuoteTotals, TierSwap};
use gate_core::validation::{validate_customer, validate_gate_for_save};
use gate_core::QuoteError;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Handle returned by [`QuoteSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// What changed in a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Customers were added, changed or removed.
    CustomersChanged,
    /// A different customer was selected, or the selection was cleared.
    CurrentCustomerChanged(Option<CustomerId>),
    /// A gate was started, opened for editing or discarded.
    CurrentGateChanged(Option<GateId>),
    /// The gate being edited was recalculated.
    GateRecalculated(QuoteTotals),
    /// The main product tier was swapped after a dimension change.
    TierSwapped(TierSwap),
    /// The gate being edited was stored on a customer.
    GateSaved {
        customer_id: CustomerId,
        gate_id: GateId,
    },
    /// The customer list was replaced by an import.
    DataImported { customers: usize },
    /// All stored data was removed.
    DataCleared,
}

/// Area change in m² a dimension edit must exceed to trigger a tier swap.
pub const TIER_SWAP_MIN_AREA_CHANGE: f64 = 0.1;

type Listener = Box<dyn FnMut(&SessionEvent)>;

/// Customer list, current selection and gate being edited.
pub struct QuoteSession<S: CustomerStore> {
    store: S,
    catalog: Catalog,
    customers: Vec<Customer>,
    current_customer: Option<CustomerId>,
    current_gate: Option<Gate>,
    default_surcharge_percent: f64,
    tier_swap: Debouncer,
    /// Total area before the first edit of the pending burst.
    swap_from_area: Option<f64>,
    /// Dimensions changed since the main tier was last applied.
    tier_check_due: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: CustomerStore> fmt::Debug for QuoteSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuoteSession")
            .field("store", &self.store.location())
            .field("customers", &self.customers.len())
            .field("current_customer", &self.current_customer)
            .field("current_gate", &self.current_gate.as_ref().map(|g| &g.id))
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<S: CustomerStore> QuoteSession<S> {
    /// Open a session, loading customers from `store`.
    ///
    /// Unreadable data is logged, copied aside where the store supports it,
    /// and the session starts empty.
    pub fn open(mut store: S, catalog: Catalog) -> Self {
        let customers = match store.load() {
            Ok(customers) => customers,
            Err(e) => {
                error!(location = %store.location(), error = %e, "failed to load customers");
                match store.preserve() {
                    Ok(Some(copy)) => warn!(copy = %copy, "unreadable data kept before overwrite"),
                    Ok(None) => warn!("unreadable data will be overwritten on the next save"),
                    Err(e) => warn!(error = %e, "could not keep a copy of unreadable data"),
                }
                Vec::new()
            }
        };
        info!(count = customers.len(), "session opened");

        Self {
            store,
            catalog,
            customers,
            current_customer: None,
            current_gate: None,
            default_surcharge_percent: 0.0,
            tier_swap: Debouncer::default(),
            swap_from_area: None,
            tier_check_due: false,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Quiet period before a dimension change swaps the main tier.
    pub fn with_tier_swap_delay(mut self, delay: Duration) -> Self {
        self.tier_swap = Debouncer::new(delay);
        self
    }

    /// Surcharge applied to newly started gates.
    pub fn with_default_surcharge(mut self, percent: f64) -> Self {
        self.default_surcharge_percent = percent;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, id: &CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| &c.id == id)
    }

    pub fn current_customer(&self) -> Option<&Customer> {
        self.current_customer
            .as_ref()
            .and_then(|id| self.customer(id))
    }

    pub fn current_gate(&self) -> Option<&Gate> {
        self.current_gate.as_ref()
    }

    pub fn tier_swap_pending(&self) -> bool {
        self.tier_swap.is_pending()
    }

    // ==================== Subscriptions ====================

    /// Register a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < before
    }

    /// Call every listener with `event`, in subscription order.
    pub fn notify(&mut self, event: SessionEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.customers).map_err(|e| {
            error!(location = %self.store.location(), error = %e, "failed to save customers");
            e
        })
    }

    // ==================== Customers ====================

    pub fn add_customer(&mut self, details: CustomerDetails) -> Result<CustomerId, StoreError> {
        validate_customer(&details).into_result()?;
        let customer = Customer::new(details);
        let id = customer.id.clone();
        self.customers.push(customer);
        self.persist()?;
        info!(customer_id = %id, "customer added");
        self.notify(SessionEvent::CustomersChanged);
        Ok(id)
    }

    pub fn update_customer(
        &mut self,
        id: &CustomerId,
        details: CustomerDetails,
    ) -> Result<(), StoreError> {
        validate_customer(&details).into_result()?;
        self.customer_mut(id)?.update(details);
        self.persist()?;
        self.notify(SessionEvent::CustomersChanged);
        Ok(())
    }

    /// Delete a customer and their gates. Clears the selection if it was them.
    pub fn delete_customer(&mut self, id: &CustomerId) -> Result<Customer, StoreError> {
        let index = self
            .customers
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| QuoteError::CustomerNotFound(id.to_string()))?;
        let removed = self.customers.remove(index);
        let was_current = self.current_customer.as_ref() == Some(id);
        if was_current {
            self.current_customer = None;
            self.discard_gate_state();
        }
        self.persist()?;
        info!(customer_id = %id, gates = removed.gate_count(), "customer deleted");

        self.notify(SessionEvent::CustomersChanged);
        if was_current {
            self.notify(SessionEvent::CurrentCustomerChanged(None));
        }
        Ok(removed)
    }

    pub fn select_customer(&mut self, id: &CustomerId) -> Result<(), StoreError> {
        if self.customer(id).is_none() {
            return Err(QuoteError::CustomerNotFound(id.to_string()).into());
        }
        self.current_customer = Some(id.clone());
        self.notify(SessionEvent::CurrentCustomerChanged(Some(id.clone())));
        Ok(())
    }

    /// Deselect the customer and drop any gate being edited.
    pub fn clear_selection(&mut self) {
        self.current_customer = None;
        self.discard_gate_state();
        self.notify(SessionEvent::CurrentCustomerChanged(None));
    }

    fn customer_mut(&mut self, id: &CustomerId) -> Result<&mut Customer, StoreError> {
        self.customers
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| QuoteError::CustomerNotFound(id.to_string()).into())
    }

    fn current_customer_id(&self) -> Result<CustomerId, StoreError> {
        self.current_customer
            .clone()
            .ok_or(StoreError::NoCurrentCustomer)
    }

    // ==================== Current gate ====================

    /// Start a new, empty gate of `gate_type` for editing.
    pub fn start_new_gate(&mut self, gate_type: GateType) -> GateId {
        let mut gate = Gate::new(gate_type);
        gate.set_surcharge(self.default_surcharge_percent);
        let id = gate.id.clone();
        debug!(gate_id = %id, gate_type = %gate_type, "started gate");
        self.cancel_tier_swap();
        self.current_gate = Some(gate);
        self.notify(SessionEvent::CurrentGateChanged(Some(id.clone())));
        id
    }

    /// Open a saved gate of the current customer for editing.
    pub fn edit_gate(&mut self, gate_id: &GateId) -> Result<(), StoreError> {
        let gate = self
            .current_customer()
            .ok_or(StoreError::NoCurrentCustomer)?
            .get_gate(gate_id)
            .cloned()
            .ok_or_else(|| QuoteError::GateNotFound(gate_id.to_string()))?;
        self.cancel_tier_swap();
        self.current_gate = Some(gate);
        self.notify(SessionEvent::CurrentGateChanged(Some(gate_id.clone())));
        Ok(())
    }

    /// Drop the gate being edited without saving.
    pub fn discard_gate(&mut self) {
        self.discard_gate_state();
        self.notify(SessionEvent::CurrentGateChanged(None));
    }

    fn cancel_tier_swap(&mut self) {
        self.tier_swap.cancel();
        self.swap_from_area = None;
        self.tier_check_due = false;
    }

    fn discard_gate_state(&mut self) {
        self.current_gate = None;
        self.cancel_tier_swap();
    }

    /// Apply an edit to the gate being edited and recalculate it.
    pub fn modify_gate<F>(&mut self, edit: F) -> Result<QuoteBreakdown, StoreError>
    where
        F: FnOnce(&mut Gate) -> Result<(), QuoteError>,
    {
        let gate = self.current_gate.as_mut().ok_or(StoreError::NoCurrentGate)?;
        edit(gate)?;
        self.recalculate()
    }

    /// Change the dimensions of the gate being edited.
    ///
    /// Areas and totals update immediately. The tier swap waits until `now`
    /// plus the debounce delay has passed without another edit, and only
    /// happens if the burst moved the total area by more than
    /// [`TIER_SWAP_MIN_AREA_CHANGE`].
    pub fn update_dimensions(
        &mut self,
        width_cm: f64,
        height_cm: f64,
        glass_height_cm: f64,
        now: Instant,
    ) -> Result<QuoteBreakdown, StoreError> {
        let gate = self.current_gate.as_mut().ok_or(StoreError::NoCurrentGate)?;
        if !self.tier_swap.is_pending() {
            self.swap_from_area = Some(gate.areas().total);
        }
        gate.set_dimensions(width_cm, height_cm, glass_height_cm);
        self.tier_swap.touch(now);
        self.tier_check_due = true;
        self.recalculate()
    }

    /// Run a pending tier swap whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<TierSwap> {
        if self.tier_swap.poll(now) {
            self.run_tier_swap()
        } else {
            None
        }
    }

    /// Run a pending tier swap right away.
    pub fn flush_tier_swap(&mut self) -> Option<TierSwap> {
        if self.tier_swap.flush() {
            self.run_tier_swap()
        } else {
            None
        }
    }

    /// Apply the tier for the current area now, dropping any pending swap.
    pub fn apply_auto_tier(&mut self) -> Result<TierSwap, StoreError> {
        self.cancel_tier_swap();
        let gate = self.current_gate.as_mut().ok_or(StoreError::NoCurrentGate)?;
        let swap = self.catalog.apply_auto_tier(gate);
        if swap.changed() {
            self.recalculate()?;
            self.notify(SessionEvent::TierSwapped(swap));
        }
        Ok(swap)
    }

    fn run_tier_swap(&mut self) -> Option<TierSwap> {
        let from_area = self.swap_from_area.take().unwrap_or(0.0);
        let gate = self.current_gate.as_mut()?;
        let to_area = gate.areas().total;
        if (to_area - from_area).abs() <= TIER_SWAP_MIN_AREA_CHANGE {
            debug!(from_area, to_area, "area change too small for a tier swap");
            return None;
        }
        let swap = self.catalog.apply_auto_tier(gate);
        self.tier_check_due = false;
        if swap.changed() {
            if let Err(e) = self.recalculate() {
                warn!(error = %e, "recalculation after tier swap failed");
            }
            self.notify(SessionEvent::TierSwapped(swap));
        }
        Some(swap)
    }

    /// Recalculate the gate being edited and cache the totals on it.
    pub fn recalculate(&mut self) -> Result<QuoteBreakdown, StoreError> {
        let gate = self.current_gate.as_mut().ok_or(StoreError::NoCurrentGate)?;
        let quote = self.catalog.quote(gate);
        gate.apply_quote(&quote);
        self.notify(SessionEvent::GateRecalculated(quote.totals()));
        Ok(quote)
    }

    /// Store the gate being edited on the current customer.
    ///
    /// After a dimension change the main tier is brought in line with the
    /// area first, regardless of how small the change was. The gate must have
    /// a size and at least one product. A gate with a known id replaces its
    /// earlier snapshot.
    pub fn save_current_gate(&mut self) -> Result<GateId, StoreError> {
        let customer_id = self.current_customer_id()?;
        if self.current_gate.is_none() {
            return Err(StoreError::NoCurrentGate);
        }

        if self.tier_check_due {
            self.apply_auto_tier()?;
        }
        let gate = self.current_gate.as_ref().ok_or(StoreError::NoCurrentGate)?;
        validate_gate_for_save(gate).into_result()?;
        self.recalculate()?;

        let snapshot = self.current_gate.clone().ok_or(StoreError::NoCurrentGate)?;
        let gate_id = snapshot.id.clone();
        self.customer_mut(&customer_id)?.upsert_gate(snapshot);
        self.persist()?;
        info!(customer_id = %customer_id, gate_id = %gate_id, "gate saved");

        self.notify(SessionEvent::GateSaved {
            customer_id,
            gate_id: gate_id.clone(),
        });
        Ok(gate_id)
    }

    /// Delete a saved gate of the current customer.
    pub fn delete_gate(&mut self, gate_id: &GateId) -> Result<(), StoreError> {
        let customer_id = self.current_customer_id()?;
        if !self.customer_mut(&customer_id)?.remove_gate(gate_id) {
            return Err(QuoteError::GateNotFound(gate_id.to_string()).into());
        }
        if self.current_gate.as_ref().map(|g| &g.id) == Some(gate_id) {
            self.discard_gate_state();
        }
        self.persist()?;
        info!(customer_id = %customer_id, gate_id = %gate_id, "gate deleted");
        self.notify(SessionEvent::CustomersChanged);
        Ok(())
    }

    // ==================== Data management ====================

    /// Pretty JSON backup of all customers.
    pub fn export(&self) -> Result<String, StoreError> {
        export_json(&self.customers)
    }

    /// Replace all customers with an imported backup.
    ///
    /// Nothing changes if the data does not parse.
    pub fn import(&mut self, json: &str) -> Result<usize, StoreError> {
        let customers = parse_customers(json)?;
        let count = customers.len();
        self.customers = customers;
        self.current_customer = None;
        self.discard_gate_state();
        self.persist()?;
        info!(count, "customers imported");
        self.notify(SessionEvent::DataImported { customers: count });
        Ok(count)
    }

    /// Remove every customer and the stored data.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.store.clear()?;
        self.customers.clear();
        self.current_customer = None;
        self.discard_gate_state();
        warn!("all customer data cleared");
        self.notify(SessionEvent::DataCleared);
        Ok(())
    }
}
