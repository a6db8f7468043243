/// Client ids attached to the service, as last reported by `onClients`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientRegistry {
    ids: Vec<String>,
}

impl ClientRegistry {
    pub fn replace(&mut self, ids: Vec<String>) {
        self.ids = ids;
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
