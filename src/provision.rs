//! Catalogue of the readers this crate offers to an archiving host.
//!
//! A host lists [`services`], shows each service's options to the user,
//! then calls [`build_reader`] with the collected values.

use std::collections::HashMap;

use serde::Serialize;

use crate::app::{AppContext, HarvestError, Result};
use crate::harvest::ArchiveReader;

pub const USER_SERVICE: &str = "weibo user";
pub const TIMELINE_SERVICE: &str = "weibo timeline";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceOption {
    pub order: u32,
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub optional: bool,
    pub value_type: ValueType,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<ServiceOption>,
}

pub fn services() -> Vec<ServiceDescriptor> {
    vec![
        ServiceDescriptor {
            name: USER_SERVICE,
            description: "get all weibo of single user",
            options: vec![ServiceOption {
                order: 0,
                name: "uid",
                label: "Weibo User ID",
                description: "the 'uid' of weibo user",
                optional: false,
                value_type: ValueType::String,
            }],
        },
        ServiceDescriptor {
            name: TIMELINE_SERVICE,
            description: "get the friends timeline of a logged-in account",
            options: vec![ServiceOption {
                order: 0,
                name: "sub",
                label: "SUB Cookie",
                description: "the 'SUB' value of the m.weibo.cn login cookie",
                optional: false,
                value_type: ValueType::String,
            }],
        },
    ]
}

fn required<'a>(values: &'a HashMap<String, String>, name: &str) -> Result<&'a str> {
    values
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| HarvestError::Config(format!("missing required option '{}'", name)))
}

/// Build and initialize the reader of service `name` from option values.
pub fn build_reader(
    ctx: &AppContext,
    name: &str,
    values: &HashMap<String, String>,
) -> Result<Box<dyn ArchiveReader>> {
    let mut reader: Box<dyn ArchiveReader> = match name {
        USER_SERVICE => Box::new(ctx.user_reader(required(values, "uid")?)),
        TIMELINE_SERVICE => Box::new(ctx.timeline_reader(required(values, "sub")?)),
        other => return Err(HarvestError::Config(format!("unknown service '{}'", other))),
    };
    reader.initialize()?;
    Ok(reader)
}
