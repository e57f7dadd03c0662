use crc32fast::Hasher;
use std::collections::HashSet;

/// Derive a short stable seed from a project name using CRC32
pub fn get_design_seed(project_name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(b"artboard://");
    hasher.update(project_name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential element ID generator scoped to one design
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(project_name: &str) -> Self {
        Self {
            seed: get_design_seed(project_name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Generate an ID guaranteed not to collide with `taken`
    pub fn new_unique_id<'a>(&mut self, taken: impl IntoIterator<Item = &'a str>) -> String {
        let taken: HashSet<&str> = taken.into_iter().collect();
        loop {
            let id = self.new_id();
            if !taken.contains(id.as_str()) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
