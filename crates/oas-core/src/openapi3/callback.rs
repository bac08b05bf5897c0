use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::operation::{PathItem, PathItemBuilder};
use crate::build::{Build, BuildContext, Component, ComponentKind, Decode, Fields};
use crate::error::{BuildError, DecodeError};

/// Out-of-band requests keyed by runtime expression, e.g.
/// `{$request.body#/callbackUrl}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Callback {
    pub paths: IndexMap<String, PathItem>,
}

#[derive(Debug, Clone)]
pub struct CallbackBuilder {
    pub paths: IndexMap<String, PathItemBuilder>,
}

impl Decode for CallbackBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "callback")?;
        let paths = fields
            .node()
            .iter()
            .filter(|(expression, _)| !expression.starts_with("x-"))
            .map(|(expression, item)| Ok((expression.clone(), PathItemBuilder::decode(item)?)))
            .collect::<Result<_, DecodeError>>()?;
        Ok(CallbackBuilder { paths })
    }
}

impl Build for CallbackBuilder {
    type Output = Callback;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Callback, BuildError> {
        Ok(Callback {
            paths: self.paths.build(cx)?,
        })
    }
}

impl Component for CallbackBuilder {
    const KIND: ComponentKind = ComponentKind::Callbacks;
}
