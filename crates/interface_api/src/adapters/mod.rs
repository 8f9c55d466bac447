//! Adapters for the settlement ports
//!
//! # Available Adapters
//!
//! - **InMemoryClaimStore**, **ChannelClaimQueue**, **InMemoryPublisher**,
//!   **InMemoryDocumentStore**, **LoggingNotifier**: process-local
//!   implementations used by the development server and tests
//! - **TextInvoiceRenderer**: fixed-width plain-text invoice
//!
//! Managed-service adapters (object storage, message queues, mail) plug in
//! by implementing the same traits from `domain_settlement::ports`.

pub mod memory;
pub mod invoice;

pub use memory::{
    ChannelClaimQueue, InMemoryClaimStore, InMemoryDocumentStore, InMemoryPublisher,
    LoggingNotifier, SentNotification,
};
pub use invoice::TextInvoiceRenderer;
