//! Protected-process policy
//!
//! A requested name is vetoed when it contains any protected keyword,
//! ignoring case. This is substring matching on purpose, so it errs on the
//! side of refusing: "MyExplorerClone" is as untouchable as "explorer".

use tracing::warn;

/// OS-critical components and vendor tooling that must never be terminated
pub const PROTECTED_KEYWORDS: &[&str] = &[
    "system",
    "winlogon",
    "csrss",
    "dwm",
    "taskmgr",
    "explorer",
    "svchost",
    "spoolsv",
    "lsass",
    "services",
    "wininit",
    "smss",
    "conhost",
    "msmpeng",
    "securityhealthservice",
    "applicationframehost",
    "runtimebroker",
    "searchui",
    "startmenuexperiencehost",
    "sihost",
    "ctfmon",
    "windows",
    "microsoft",
    "dllhost",
    "fontdrvhost",
    // Hardware vendor and sync agents
    "hp",
    "dell",
    "lenovo",
    "intel",
    "onedrive",
];

/// Names that survived the policy, case-insensitively unique, in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovedNames(Vec<String>);

impl ApprovedNames {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        self.0.iter().any(|n| n.to_lowercase() == key)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// True when `name` contains a protected keyword
pub fn is_protected(name: &str) -> bool {
    let lower = name.to_lowercase();
    PROTECTED_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Drop protected names and case-insensitive duplicates, keeping first occurrences
pub fn filter<S: AsRef<str>>(requested: &[S]) -> ApprovedNames {
    let mut approved: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for requested_name in requested {
        let name: &str = requested_name.as_ref();
        // A blank name would substring-match every process
        if name.trim().is_empty() {
            continue;
        }
        if is_protected(name) {
            warn!(name, "Refusing protected process");
            continue;
        }
        let key = name.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        approved.push(name.to_string());
    }

    ApprovedNames(approved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_protected_substrings_rejected() {
        let approved = filter(&["explorer", "ExplorerPlus", "svchost.exe", "MsMpEng", "chrome"]);
        assert_eq!(approved.into_vec(), vec!["chrome"]);
    }

    #[test]
    fn test_vendor_prefixes_rejected() {
        for name in ["HPPrintScan", "DellUpdate", "IntelGraphics", "LenovoVantage", "OneDrive"] {
            assert!(is_protected(name), "{} should be protected", name);
        }
    }

    #[test]
    fn test_dedupes_case_insensitively_keeping_first() {
        let approved = filter(&["Chrome", "chrome", "CHROME", "Slack"]);
        assert_eq!(approved.into_vec(), vec!["Chrome", "Slack"]);
    }

    #[test]
    fn test_all_protected_is_empty() {
        let approved = filter(&["explorer", "System", "dwm"]);
        assert!(approved.is_empty());
    }

    #[test]
    fn test_empty_request() {
        let requested: Vec<String> = Vec::new();
        assert!(filter(&requested).is_empty());
    }

    #[test]
    fn test_contains_ignores_case() {
        let approved = filter(&["Notepad"]);
        assert!(approved.contains("NOTEPAD"));
        assert!(!approved.contains("notepad++"));
    }

    proptest! {
        #[test]
        fn prop_no_protected_name_survives(names in prop::collection::vec("[A-Za-z]{0,12}", 0..12)) {
            let approved = filter(&names);
            for name in approved.iter() {
                let lower = name.to_lowercase();
                prop_assert!(PROTECTED_KEYWORDS.iter().all(|k| !lower.contains(k)));
            }
        }

        #[test]
        fn prop_filter_is_idempotent(names in prop::collection::vec("[A-Za-z]{0,12}", 0..12)) {
            let once = filter(&names);
            let twice = filter(&once.clone().into_vec());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_approved_is_subset_and_unique(names in prop::collection::vec("[A-Ca-c]{1,3}", 0..12)) {
            let approved = filter(&names).into_vec();
            for name in &approved {
                prop_assert!(names.contains(name));
            }
            let mut keys: Vec<String> = approved.iter().map(|n| n.to_lowercase()).collect();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), approved.len());
        }
    }
}
