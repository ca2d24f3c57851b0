// src/infrastructure/util.rs
use crate::{application::ports::util::SlugGenerator, domain::slug::derive_slug};

#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        derive_slug(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugifies_names() {
        assert_eq!(DefaultSlugGenerator.slugify("Robot Beroda"), "robot-beroda");
        assert_eq!(DefaultSlugGenerator.slugify("???"), "");
    }
}
