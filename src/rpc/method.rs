//! RPC method definitions
//!
//! Every operation this layer can send, rendered through one call.

use crate::error::Result;
use crate::tree::{encode_configuration, Configuration};

/// Well-known datastore names
///
/// Not enforced: any name renders, validity is up to the device.
pub mod datastore {
    pub const RUNNING: &str = "running";
    pub const CANDIDATE: &str = "candidate";
    pub const STARTUP: &str = "startup";
}

/// A single request fragment inside an `<rpc>` envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// Lock a datastore
    Lock { target: String },

    /// Release a datastore lock
    Unlock { target: String },

    /// Fetch a whole datastore
    GetConfig { source: String },

    /// Fetch `running`, filtered by a configuration subtree
    GetConfigFiltered { filter: Configuration },

    /// Merge a configuration into `candidate`
    EditConfig { config: Configuration },

    /// Edit `candidate` with delete stamped on the book's direct children
    DeleteConfig { config: Configuration },

    /// Commit `candidate` to `running`
    Commit,

    /// Drop uncommitted `candidate` changes
    DiscardChanges,

    /// A pre-built fragment, sent verbatim
    Raw(String),
}

impl Method {
    pub fn lock(target: impl Into<String>) -> Self {
        Method::Lock { target: target.into() }
    }

    pub fn unlock(target: impl Into<String>) -> Self {
        Method::Unlock { target: target.into() }
    }

    pub fn get_config(source: impl Into<String>) -> Self {
        Method::GetConfig { source: source.into() }
    }

    pub fn get_config_filtered(filter: Configuration) -> Self {
        Method::GetConfigFiltered { filter }
    }

    pub fn edit_config(config: Configuration) -> Self {
        Method::EditConfig { config }
    }

    pub fn delete_config(config: Configuration) -> Self {
        Method::DeleteConfig { config }
    }

    pub fn commit() -> Self {
        Method::Commit
    }

    pub fn discard_changes() -> Self {
        Method::DiscardChanges
    }

    pub fn raw(fragment: impl Into<String>) -> Self {
        Method::Raw(fragment.into())
    }

    /// Operation name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Method::Lock { .. } => "lock",
            Method::Unlock { .. } => "unlock",
            Method::GetConfig { .. } | Method::GetConfigFiltered { .. } => "get-config",
            Method::EditConfig { .. } | Method::DeleteConfig { .. } => "edit-config",
            Method::Commit => "commit",
            Method::DiscardChanges => "discard-changes",
            Method::Raw(_) => "raw",
        }
    }

    /// Render to the canonical request fragment
    ///
    /// Pure: the same method always renders to the same string. Only the
    /// tree-carrying variants can fail.
    pub fn render(&self) -> Result<String> {
        let fragment = match self {
            Method::Lock { target } => format!("<lock><target><{}/></target></lock>", target),
            Method::Unlock { target } => {
                format!("<unlock><target><{}/></target></unlock>", target)
            }
            Method::GetConfig { source } => {
                format!("<get-config><source><{}/></source></get-config>", source)
            }
            Method::GetConfigFiltered { filter } => format!(
                "<get-config><source><running/></source><filter type=\"subtree\">{}</filter></get-config>",
                encode_configuration(filter)?
            ),
            Method::EditConfig { config } => edit_config_fragment(config)?,
            Method::DeleteConfig { config } => edit_config_fragment(&config.for_delete())?,
            Method::Commit => "<commit/>".to_string(),
            Method::DiscardChanges => "<discard-changes/>".to_string(),
            Method::Raw(fragment) => fragment.clone(),
        };
        Ok(fragment)
    }
}

fn edit_config_fragment(config: &Configuration) -> Result<String> {
    Ok(format!(
        "<edit-config><target><candidate/></target><config>{}</config></edit-config>",
        encode_configuration(config)?
    ))
}
