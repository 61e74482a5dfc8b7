//! Test fixtures and per-request helpers.

use fieldset_model::{
    BundleItem, Cardinality, FieldBundle, FieldDefinition, HostEntity, HostFieldConfig,
};
use fieldset_storage::{ContentStore, MemoryStore};
use fieldset_web::{HandlerContext, ItemController, MemoryAuditLog, Messenger, RouteParams};
use serde_json::json;
use std::sync::Arc;
use std::sync::Once;

/// Bundle machine name used by the fixtures.
pub const BUNDLE: &str = "contact_point";
/// Human label of the fixture bundle.
pub const BUNDLE_LABEL: &str = "Contact point";
/// Host entity type used by the fixtures.
pub const HOST_TYPE: &str = "article";
/// The required inner field of the fixture bundle.
pub const INNER_FIELD: &str = "phone";

/// A store pre-populated with the fixture bundle and host type.
///
/// The audit log is shared across requests, mirroring a process-level log
/// channel; messengers are created fresh per request via
/// [`request`](Self::request).
pub struct TestBed {
    /// The shared store.
    pub store: Arc<MemoryStore>,
    /// The shared audit log.
    pub audit: Arc<MemoryAuditLog>,
}

impl TestBed {
    /// Creates a test bed with an unlimited-cardinality reference field.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cardinality(Cardinality::Unlimited)
    }

    /// Creates a test bed with the given field cardinality.
    #[must_use]
    pub fn with_cardinality(cardinality: Cardinality) -> Self {
        let store = Arc::new(MemoryStore::new());
        store.define_bundle(
            FieldBundle::new(BUNDLE, BUNDLE_LABEL)
                .with_field(FieldDefinition::new(INNER_FIELD, "Phone").required())
                .with_field(FieldDefinition::new("city", "City")),
        );
        store
            .attach_field(HostFieldConfig::new(HOST_TYPE, BUNDLE, cardinality))
            .expect("fixture bundle is defined");

        Self {
            store,
            audit: Arc::new(MemoryAuditLog::new()),
        }
    }

    /// Starts a request: a controller with its own fresh messenger.
    #[must_use]
    pub fn request(&self) -> ItemController {
        let context = HandlerContext::new(
            self.store.clone() as Arc<dyn ContentStore>,
            Arc::new(Messenger::new()),
            self.audit.clone(),
        );
        ItemController::new(Arc::new(context))
    }

    /// Creates and saves a host of the fixture type.
    pub fn create_host(&self, title: &str) -> HostEntity {
        let mut host = HostEntity::new(HOST_TYPE, title);
        self.store.save_host(&mut host).expect("host saves");
        host
    }

    /// Creates a host with one attached item, the way an editor would.
    ///
    /// Returns the saved host and item; the host's reference field already
    /// carries the item's id and revision.
    pub fn create_host_with_item(&self) -> (HostEntity, BundleItem) {
        let mut host = self.create_host("A host");
        let mut item = self.store.create_item(BUNDLE).expect("fixture bundle exists");
        item.set_value(INNER_FIELD, json!("555-0100"));
        self.store
            .save_item(&mut item, &mut host)
            .expect("item saves");
        (host, item)
    }

    /// Route parameters for the add route against a saved host.
    #[must_use]
    pub fn add_params(&self, host: &HostEntity) -> RouteParams {
        RouteParams::new()
            .with("bundle", BUNDLE)
            .with("host_type", HOST_TYPE)
            .with(
                "host_id",
                host.id.expect("host is saved").as_u64().to_string(),
            )
    }
}

impl Default for TestBed {
    fn default() -> Self {
        Self::new()
    }
}

/// Initializes tracing for tests. Safe to call more than once.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
