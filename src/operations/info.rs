//! Info operation: details of a single installed command

use crate::error::{CmdpackError, Result};
use crate::operations::list::{CommandListing, ListOperation};
use crate::project::Project;

pub struct InfoOperation<'a> {
    project: &'a Project,
}

impl<'a> InfoOperation<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    pub fn info(&self, name: &str) -> Result<CommandListing> {
        ListOperation::new(self.project)
            .find(name)?
            .ok_or_else(|| CmdpackError::CommandNotFound {
                name: name.to_string(),
            })
    }
}
