//! Recursive resolution of parent and plugin references

use devfile_api::{Devfile, Reference, WorkspaceContent};
use devfile_context::Location;

use super::{apply_overrides, merge_content};
use crate::error::ReferenceContext;
use crate::{Error, Parser, Result};

/// Flattens one top-level document.
///
/// Tracks the documents currently being resolved so that a reference back
/// to any of them fails with [`Error::Cycle`] instead of recursing forever.
/// Siblings may share a reference (two plugins pointing at the same file);
/// only a reference to an ancestor is a cycle.
pub(crate) struct Resolver<'p> {
    parser: &'p Parser,
    chain: Vec<String>,
}

impl<'p> Resolver<'p> {
    pub(crate) fn new(parser: &'p Parser) -> Self {
        Self {
            parser,
            chain: Vec::new(),
        }
    }

    /// Flatten `devfile`, which was loaded from `location`.
    pub(crate) fn flatten(&mut self, devfile: Devfile, location: &Location) -> Result<Devfile> {
        let identity = location.identity();
        if self.chain.contains(&identity) {
            let mut chain = self.chain.clone();
            chain.push(identity);
            return Err(Error::Cycle { chain });
        }

        self.chain.push(identity);
        let result = self.flatten_layers(devfile, location);
        self.chain.pop();
        result
    }

    fn flatten_layers(&mut self, devfile: Devfile, location: &Location) -> Result<Devfile> {
        let parent = match devfile.parent_reference() {
            Some(reference) => self.resolve(location, reference, ReferenceContext::Parent)?,
            None => WorkspaceContent::default(),
        };

        let mut plugins = Vec::new();
        for (component, reference) in devfile.content.plugins() {
            let context = ReferenceContext::Plugin {
                component: component.name.clone(),
            };

            if reference.has_uri() {
                plugins.push(self.resolve(location, reference, context)?);
                continue;
            }

            if self.parser.options().strict_plugins {
                return Err(Error::PluginWithoutUri {
                    component: component.name.clone(),
                });
            }
            tracing::warn!(
                component = %component.name,
                %location,
                "Plugin component has no uri and contributes nothing"
            );
            let content = match &reference.overrides {
                Some(overrides) => apply_overrides(&WorkspaceContent::default(), overrides)
                    .map_err(|source| Error::Reference {
                        context,
                        uri: reference.uri.clone(),
                        source: Box::new(source),
                    })?,
                None => WorkspaceContent::default(),
            };
            plugins.push(content);
        }

        let content = merge_content(&devfile.content.without_plugins(), &parent, &plugins)?;
        Ok(Devfile {
            parent: None,
            content,
            ..devfile
        })
    }

    /// Load, flatten and override the document `reference` points at.
    fn resolve(
        &mut self,
        base: &Location,
        reference: &Reference,
        context: ReferenceContext,
    ) -> Result<WorkspaceContent> {
        let wrap = |source: Error| Error::Reference {
            context: context.clone(),
            uri: reference.uri.clone(),
            source: Box::new(source),
        };

        let target = base
            .resolve_reference(&reference.uri)
            .map_err(|e| wrap(e.into()))?;
        tracing::debug!(%context, location = %target, "Resolving reference");

        let devfile = self.load_flattened(&target).map_err(wrap)?;
        let content = match &reference.overrides {
            Some(overrides) if !overrides.is_empty() => {
                apply_overrides(&devfile.content, overrides).map_err(wrap)?
            }
            _ => devfile.content,
        };

        tracing::debug!(%context, location = %target, "Added content of referenced devfile");
        Ok(content)
    }

    fn load_flattened(&mut self, location: &Location) -> Result<Devfile> {
        let ctx = self.parser.loader().load(location)?;
        let devfile = self.parser.decode(&ctx)?;
        self.flatten(devfile, ctx.location())
    }
}
