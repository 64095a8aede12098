/*
 * Wayfarer, a chess engine
 * Copyright (C) 2026 The Wayfarer Authors
 *
 * Wayfarer is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * Wayfarer is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Wayfarer. If not, see <https://www.gnu.org/licenses/>.
 */

//! Runtime configuration for the search, layered the way the CLI harness
//! expects: defaults, then environment variables, then explicit CLI flags.
//! Nothing in [`crate::board`] or [`crate::search`] reads the environment or
//! `std::env::args` directly; only this module and the CLI harness do.

use crate::transposition_table::DEFAULT_SIZE;

/// The environment variable overriding [`EngineConfig::budget_ms`].
const BUDGET_ENV_VAR: &str = "ENGINE_BUDGET_MS";

/// The environment variable overriding [`EngineConfig::tt_size`], given in
/// mebibytes of transposition table entries.
const TT_MB_ENV_VAR: &str = "ENGINE_TT_MB";

/// The default search budget, in milliseconds, when neither an environment
/// variable nor a CLI flag overrides it.
const DEFAULT_BUDGET_MS: u32 = 1_000;

/// The approximate size in bytes of one transposition table entry (a
/// [`crate::zobrist::Key`], a [`crate::movegen::Move`], a depth, an
/// evaluation, and a bound tag), used to convert a mebibyte count from
/// `ENGINE_TT_MB` into a slot count. The table's slot type is private to
/// [`crate::transposition_table`], so this is an estimate rather than a
/// `size_of`.
const APPROX_ENTRY_SIZE_BYTES: usize = 16;

/// Engine-wide configuration, assembled once by the CLI harness before a
/// search begins.
#[derive(Clone, Copy)]
pub struct EngineConfig {
    /// Milliseconds of wall-clock time iterative deepening is allowed per
    /// search.
    pub budget_ms: u32,
    /// The number of slots in the transposition table.
    pub tt_size: usize,
}

impl EngineConfig {
    /// Builds a config from defaults overridden by `ENGINE_BUDGET_MS` and
    /// `ENGINE_TT_MB` if they are set and parse as the expected integer
    /// type. A malformed environment variable is logged and ignored rather
    /// than rejected, since this is provisioning, not user input to the
    /// engine proper.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(BUDGET_ENV_VAR) {
            match value.parse() {
                Ok(budget_ms) => config.budget_ms = budget_ms,
                Err(_) => log::warn!("{BUDGET_ENV_VAR}='{value}' is not a valid u32; ignoring"),
            }
        }

        if let Ok(value) = std::env::var(TT_MB_ENV_VAR) {
            match value.parse::<usize>() {
                Ok(mebibytes) => config.tt_size = (mebibytes * 1024 * 1024 / APPROX_ENTRY_SIZE_BYTES).max(1),
                Err(_) => log::warn!("{TT_MB_ENV_VAR}='{value}' is not a valid usize; ignoring"),
            }
        }

        config
    }

    /// Overrides [`Self::budget_ms`], as though a `--budget-ms` CLI flag had
    /// been given. CLI flags take precedence over whatever [`Self::from_env`]
    /// already applied.
    #[must_use]
    pub const fn with_budget_ms(mut self, budget_ms: u32) -> Self {
        self.budget_ms = budget_ms;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            budget_ms: DEFAULT_BUDGET_MS,
            tt_size: DEFAULT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = EngineConfig::default();
        assert_eq!(config.budget_ms, 1_000);
        assert_eq!(config.tt_size, super::DEFAULT_SIZE);
    }

    #[test]
    fn cli_flag_overrides_the_default_budget() {
        let config = EngineConfig::default().with_budget_ms(5_000);
        assert_eq!(config.budget_ms, 5_000);
    }
}
