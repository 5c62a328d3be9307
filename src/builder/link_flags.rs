//! Linker flags naming every pod target linked into the consuming binary.

use crate::core::settings::{keys, SettingsTable};
use crate::core::{Packaging, PodTarget, TargetFacts};

pub struct LinkFlags<'a> {
    target: &'a TargetFacts,
}

impl<'a> LinkFlags<'a> {
    pub fn new(target: &'a TargetFacts) -> Self {
        LinkFlags { target }
    }

    /// One flag per buildable pod target, in pod order.
    pub fn flags(&self) -> Vec<String> {
        self.target
            .pod_targets
            .iter()
            .filter(|pod| pod.should_build)
            .map(link_flag)
            .collect()
    }

    pub fn settings(&self) -> SettingsTable {
        SettingsTable::new().with(keys::OTHER_LDFLAGS, self.flags().join(" "))
    }
}

fn link_flag(pod: &PodTarget) -> String {
    match pod.packaging() {
        Packaging::Framework => format!("-framework \"{}\"", pod.product_basename),
        Packaging::StaticLibrary => format!("-l \"{}\"", pod.product_basename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Platform;
    use crate::test_support::fixtures::{framework_pod, pod, static_target};

    #[test]
    fn test_flags_by_packaging() {
        let target = static_target(Platform::Ios, vec![pod("Masonry"), framework_pod("Alamofire")]);

        assert_eq!(
            LinkFlags::new(&target).flags(),
            vec!["-l \"Masonry\"", "-framework \"Alamofire\""]
        );
    }

    #[test]
    fn test_prebuilt_pods_are_not_linked() {
        let mut prebuilt = pod("Prebuilt");
        prebuilt.should_build = false;
        let target = static_target(Platform::Ios, vec![prebuilt, pod("Built")]);

        let settings = LinkFlags::new(&target).settings();
        assert_eq!(settings.get(keys::OTHER_LDFLAGS), Some("-l \"Built\""));
    }

    #[test]
    fn test_basename_differs_from_name() {
        let mut renamed = framework_pod("Firebase-Core");
        renamed.product_basename = "FirebaseCore".to_string();
        let target = static_target(Platform::Ios, vec![renamed]);

        assert_eq!(LinkFlags::new(&target).flags(), vec!["-framework \"FirebaseCore\""]);
    }

    #[test]
    fn test_no_pods() {
        let target = static_target(Platform::Ios, vec![]);
        assert_eq!(
            LinkFlags::new(&target).settings().get(keys::OTHER_LDFLAGS),
            Some("")
        );
    }
}
