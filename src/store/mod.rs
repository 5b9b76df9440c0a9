pub mod firestore;

pub use firestore::{FirestoreClient, ServiceAccount};
