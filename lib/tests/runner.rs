//! Entry point for the `polycheck-core` integration test binary (see the
//! `[[test]]` section in `Cargo.toml`): one module per focused test file.

mod test_config_layering;
mod test_dependency_graph;
mod test_validator_registry;
