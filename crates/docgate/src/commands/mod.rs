//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod inventory;

pub(crate) use check::CheckArgs;
pub(crate) use inventory::InventoryArgs;
