//! In-memory fakes shared by the unit tests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use regatta_adapter::{Adapter, AdapterError, AdapterInfo, ChartRegistry, ImageRegistry};
use regatta_model::{
    Namespace, Registry, RegistryType, Resource, ResourceMetadata, ResourceType,
};

pub(crate) fn resource(kind: ResourceType, name: &str, namespace: &str, vtags: &[&str]) -> Resource {
    Resource {
        kind,
        metadata: Some(ResourceMetadata {
            name: name.to_owned(),
            namespace: namespace.to_owned(),
            vtags: vtags.iter().map(|s| s.to_string()).collect(),
        }),
        registry: None,
        extended_info: BTreeMap::new(),
        deleted: false,
        overwrite: false,
    }
}

pub(crate) fn repository(name: &str, namespace: &str, vtags: &[&str]) -> Resource {
    resource(ResourceType::Repository, name, namespace, vtags)
}

pub(crate) fn chart(name: &str, namespace: &str, vtags: &[&str]) -> Resource {
    resource(ResourceType::Chart, name, namespace, vtags)
}

pub(crate) fn registry_of(kind: &str, url: &str) -> Registry {
    Registry {
        name: kind.to_owned(),
        kind: RegistryType::from(kind),
        url: url.to_owned(),
        credential: None,
        insecure: false,
    }
}

/// Scripted adapter: capability flags, canned resources and namespaces,
/// optional failure injection. Records created namespaces.
#[derive(Default)]
pub(crate) struct FakeAdapter {
    pub supported: Vec<ResourceType>,
    pub images: Vec<Resource>,
    pub charts: Vec<Resource>,
    pub image_capable: bool,
    pub chart_capable: bool,
    pub namespaces: BTreeMap<String, Namespace>,
    pub fail_fetch: bool,
    pub fail_create_namespace: Option<String>,
    pub created_namespaces: RefCell<Vec<String>>,
}

impl FakeAdapter {
    pub(crate) fn with_namespace(mut self, name: &str) -> Self {
        self.namespaces.insert(
            name.to_owned(),
            Namespace {
                name: name.to_owned(),
                metadata: BTreeMap::new(),
            },
        );
        self
    }
}

impl Adapter for FakeAdapter {
    fn info(&self) -> Result<AdapterInfo, AdapterError> {
        Ok(AdapterInfo {
            supported_resource_types: self.supported.clone(),
        })
    }

    fn image_registry(&self) -> Option<&dyn ImageRegistry> {
        if self.image_capable {
            Some(self)
        } else {
            None
        }
    }

    fn chart_registry(&self) -> Option<&dyn ChartRegistry> {
        if self.chart_capable {
            Some(self)
        } else {
            None
        }
    }

    fn get_namespace(&self, name: &str) -> Result<Namespace, AdapterError> {
        self.namespaces
            .get(name)
            .cloned()
            .ok_or_else(|| AdapterError::NamespaceNotFound {
                name: name.to_owned(),
            })
    }

    fn create_namespace(&self, namespace: &Namespace) -> Result<(), AdapterError> {
        if self.fail_create_namespace.as_deref() == Some(namespace.name.as_str()) {
            return Err(AdapterError::backend("quota exceeded"));
        }
        self.created_namespaces
            .borrow_mut()
            .push(namespace.name.clone());
        Ok(())
    }
}

impl ImageRegistry for FakeAdapter {
    fn fetch_images(
        &self,
        _namespaces: &[String],
        _filters: &[regatta_model::Filter],
    ) -> Result<Vec<Resource>, AdapterError> {
        if self.fail_fetch {
            return Err(AdapterError::backend("listing failed"));
        }
        Ok(self.images.clone())
    }
}

impl ChartRegistry for FakeAdapter {
    fn fetch_charts(
        &self,
        _namespaces: &[String],
        _filters: &[regatta_model::Filter],
    ) -> Result<Vec<Resource>, AdapterError> {
        if self.fail_fetch {
            return Err(AdapterError::backend("listing failed"));
        }
        Ok(self.charts.clone())
    }
}
