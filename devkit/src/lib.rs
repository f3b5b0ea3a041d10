/*!
# Phasor DevKit - Outils de test pour les services Phasor

Bibliothèque facilitant les tests des services avec:
- Spawn d'une app axum in-process sur un port libre
- Mock du backend d'instances (réponses scriptées, pannes, JSON invalide)
- Configs YAML temporaires
- Harness full-stack backend + frontend
*/

pub mod app_server;
pub mod mock_backend;
pub mod test_utils;

pub use app_server::{spawn_app, TestServer};
pub use mock_backend::{MockBackend, MockBehavior};
pub use test_utils::{init_test_logging, write_temp_config, StackHarness};
