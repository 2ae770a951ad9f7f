//! Burnish Rules
//!
//! Built-in style rules and fixers for the burnish lint engine: brace
//! enforcement for if/else branches, predefined-type alias replacement, and
//! assert-message injection. `builtin::registry()` assembles them into a
//! ready-to-walk [`burnish_core::RuleRegistry`].

pub mod builtin;

pub use builtin::{
    ASSERT_WITHOUT_MESSAGE, AssertMessageFix, AssertMessageRule, BraceEnforcementRule, BraceFix,
    EXPLICIT_TYPE_NAMES, IF_ELSE_BRACES, PredefinedTypeFix, PredefinedTypeRule, all_rules,
    fixer_for, registry,
};
