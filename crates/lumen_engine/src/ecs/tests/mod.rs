//! Cross-module scenarios: scene, built-in components and the render system

mod render_integration;
