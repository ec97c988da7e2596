//! Caller-facing result contract.
//!
//! A caller launches the editor with an optional input locator and gets back
//! either a confirmed export or a cancellation. Both directions travel as a
//! flat string-keyed [`Extras`] map plus an integer result code, the shape
//! most host platforms use for one-shot "pick a result" flows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::export::Locator;
use crate::platform::Sharer;

pub const EXTRA_INPUT_URI: &str = "imageeditkit.extra.INPUT_URI";
pub const EXTRA_OUTPUT_URI: &str = "imageeditkit.extra.OUTPUT_URI";
pub const EXTRA_OUTPUT_WIDTH: &str = "imageeditkit.extra.OUTPUT_WIDTH";
pub const EXTRA_OUTPUT_HEIGHT: &str = "imageeditkit.extra.OUTPUT_HEIGHT";

pub const RESULT_OK: i32 = -1;
pub const RESULT_CANCELED: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Int(i64),
    Text(String),
}

pub type Extras = BTreeMap<String, ExtraValue>;

/// A finished export handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditResult {
    pub locator: Locator,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Confirmed(EditResult),
    Cancelled,
}

impl EditOutcome {
    /// Result code and extras to hand back to the caller.
    ///
    /// A confirmed result first grants `recipient` read access to the
    /// output locator.
    pub fn into_reply(self, sharer: &dyn Sharer, recipient: &str) -> (i32, Option<Extras>) {
        match self {
            EditOutcome::Cancelled => (RESULT_CANCELED, None),
            EditOutcome::Confirmed(result) => {
                sharer.grant_read_access(&result.locator, recipient);
                debug!(locator = %result.locator, recipient, "Granted read access to result");

                let mut extras = Extras::new();
                extras.insert(
                    EXTRA_OUTPUT_URI.to_string(),
                    ExtraValue::Text(result.locator.into_string()),
                );
                extras.insert(
                    EXTRA_OUTPUT_WIDTH.to_string(),
                    ExtraValue::Int(i64::from(result.width)),
                );
                extras.insert(
                    EXTRA_OUTPUT_HEIGHT.to_string(),
                    ExtraValue::Int(i64::from(result.height)),
                );
                (RESULT_OK, Some(extras))
            }
        }
    }
}

/// The locator a caller asked the editor to open, if any.
pub fn requested_input(extras: &Extras) -> Option<Locator> {
    match extras.get(EXTRA_INPUT_URI)? {
        ExtraValue::Text(uri) if !uri.is_empty() => Some(Locator::new(uri.clone())),
        _ => None,
    }
}

/// Typed launch/result conversion for one kind of sub-flow.
pub trait ResultContract {
    type Input;
    type Output;

    fn create_request(&self, input: Self::Input) -> Extras;

    /// `None` for a cancellation or a malformed reply.
    fn parse_result(&self, code: i32, extras: Option<&Extras>) -> Option<Self::Output>;
}

/// Contract for launching the editor and reading back its [`EditResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageEditContract;

impl ResultContract for ImageEditContract {
    type Input = Option<Locator>;
    type Output = EditResult;

    fn create_request(&self, input: Option<Locator>) -> Extras {
        let mut extras = Extras::new();
        if let Some(locator) = input {
            extras.insert(EXTRA_INPUT_URI.to_string(), ExtraValue::Text(locator.into_string()));
        }
        extras
    }

    fn parse_result(&self, code: i32, extras: Option<&Extras>) -> Option<EditResult> {
        if code != RESULT_OK {
            return None;
        }
        let extras = extras?;

        let locator = match extras.get(EXTRA_OUTPUT_URI)? {
            ExtraValue::Text(uri) if !uri.is_empty() => Locator::new(uri.clone()),
            _ => return None,
        };
        let dimension = |key: &str| match extras.get(key) {
            Some(ExtraValue::Int(v)) if *v > 0 => u32::try_from(*v).ok(),
            _ => None,
        };

        Some(EditResult {
            locator,
            width: dimension(EXTRA_OUTPUT_WIDTH)?,
            height: dimension(EXTRA_OUTPUT_HEIGHT)?,
        })
    }
}
