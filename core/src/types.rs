//! Shared primitive types used across the engine.

/// A region code, e.g. "FR" or "UK". Every rule, forecast row and agent belongs to one.
pub type RegionCode = String;

/// A stable roster identifier for an agent.
pub type AgentId = String;

/// Minutes, possibly fractional (handle times and capacities are not whole).
pub type Minutes = f64;

/// Whole-head count of agents.
pub type Headcount = u32;
