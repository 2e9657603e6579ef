use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One scored event attributed to a contributor, as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Free-form tag such as `"PR opened"` or `"Issue opened"`.
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Timestamp string exactly as written in the snapshot.
    #[serde(default, deserialize_with = "null_as_default")]
    pub occured_at: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Usually a GitHub issue or pull request URL.
    #[serde(default)]
    pub link: Option<String>,
    /// Points awarded; `null` or absent reads as zero.
    #[serde(default, deserialize_with = "lenient_points")]
    pub points: i64,
}

impl Activity {
    /// `true` when the type tag mentions a pull request.
    ///
    /// Classification is by substring, so a tag can count as both a pull
    /// request and an issue.
    pub fn is_pull_request(&self) -> bool {
        self.activity_type.contains("PR")
    }

    /// `true` when the type tag mentions an issue.
    pub fn is_issue(&self) -> bool {
        self.activity_type.contains("Issue")
    }

    /// Substring match of `filter` against the type tag.
    pub fn matches_type(&self, filter: &str) -> bool {
        self.activity_type.contains(filter)
    }
}

/// Per-activity-type totals for one contributor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownStat {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient_points")]
    pub points: i64,
}

/// Points earned on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: String,
    #[serde(default, deserialize_with = "lenient_points")]
    pub points: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// One contributor's record within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_points")]
    pub total_points: i64,
    /// Activities in file order. Missing or `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<Activity>,
    /// Activity list consumed by profile pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_activities: Option<Vec<Activity>>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub activity_breakdown: BTreeMap<String, BreakdownStat>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub daily_activity: Vec<DailyActivity>,
}

impl Contributor {
    /// Display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }

    /// Case-insensitive comparison against `username`.
    pub fn has_username(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase()
    }

    /// The activities a profile page is built from.
    ///
    /// Prefers `raw_activities`. An entry without it falls back to
    /// `activities` instead of yielding an empty profile, so this differs
    /// from readers that only ever look at `raw_activities`.
    pub fn profile_activities(&self) -> &[Activity] {
        self.raw_activities.as_deref().unwrap_or(&self.activities)
    }
}

/// Summary row listed under an activity type in `topByActivity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopContributor {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_points")]
    pub points: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// Activity type → top contributors, kept in the key order of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLeaders(pub Vec<(String, Vec<TopContributor>)>);

impl ActivityLeaders {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TopContributor])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Leaders for one activity type.
    pub fn get(&self, activity_type: &str) -> Option<&[TopContributor]> {
        self.0
            .iter()
            .find(|(k, _)| k == activity_type)
            .map(|(_, v)| v.as_slice())
    }
}

impl Serialize for ActivityLeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ActivityLeaders {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LeadersVisitor;

        impl<'de> Visitor<'de> for LeadersVisitor {
            type Value = ActivityLeaders;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of activity type to top contributors")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs: Vec<(String, Vec<TopContributor>)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) =
                    access.next_entry::<String, Vec<TopContributor>>()?
                {
                    // A repeated key overwrites the earlier value in place.
                    match pairs.iter().position(|(k, _)| *k == key) {
                        Some(i) => pairs[i].1 = value,
                        None => pairs.push((key, value)),
                    }
                }
                Ok(ActivityLeaders(pairs))
            }
        }

        deserializer.deserialize_map(LeadersVisitor)
    }
}

/// Root document of a `<period>.json` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<Contributor>,
    #[serde(
        rename = "topByActivity",
        default,
        deserialize_with = "null_as_default"
    )]
    pub top_by_activity: ActivityLeaders,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A contributor activity flattened for display, with a list key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    /// Unique key of this item within the list it belongs to.
    pub slug: String,
    pub contributor: String,
    pub contributor_name: Option<String>,
    pub contributor_avatar_url: Option<String>,
    pub contributor_role: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub occured_at: String,
    pub closed_at: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub points: i64,
}

impl ActivityItem {
    /// Flatten `activity` for `contributor` under the given slug.
    pub fn new(contributor: &Contributor, activity: &Activity, slug: String) -> Self {
        Self {
            slug,
            contributor: contributor.username.clone(),
            contributor_name: contributor.name.clone(),
            contributor_avatar_url: contributor.avatar_url.clone(),
            contributor_role: contributor.role.clone(),
            activity_type: activity.activity_type.clone(),
            occured_at: activity.occured_at.clone(),
            closed_at: activity.occured_at.clone(),
            title: activity.title.clone(),
            link: activity.link.clone(),
            points: activity.points,
        }
    }
}

/// Build the list key `{username}-{type}-{occured_at}-{index}`.
pub fn activity_slug(username: &str, activity: &Activity, index: usize) -> String {
    format!(
        "{}-{}-{}-{}",
        username, activity.activity_type, activity.occured_at, index
    )
}

/// Treat an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a points value as a whole number.
///
/// Fractional values are truncated toward zero, values past the `i64` range
/// saturate and `null` reads as 0.
fn lenient_points<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct PointsVisitor;

    impl<'de> Visitor<'de> for PointsVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or null")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            // `as` saturates and maps NaN to 0.
            Ok(v.trunc() as i64)
        }

        fn visit_unit<E: de::Error>(self) -> Result<i64, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<i64, E> {
            Ok(0)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<i64, D2::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(PointsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn activity(kind: &str) -> Activity {
        Activity {
            activity_type: kind.to_string(),
            occured_at: "2024-01-01T00:00:00Z".to_string(),
            title: None,
            link: None,
            points: 0,
        }
    }

    #[test]
    fn test_activity_null_points_default_to_zero() {
        let a: Activity = serde_json::from_value(json!({
            "type": "PR opened",
            "occured_at": "2024-01-01",
            "points": null,
        }))
        .unwrap();
        assert_eq!(a.points, 0);
        assert!(a.title.is_none());
        assert!(a.link.is_none());
    }

    #[test]
    fn test_fractional_points_are_truncated() {
        let a: Activity = serde_json::from_value(json!({
            "type": "PR opened",
            "occured_at": "2024-01-01",
            "points": 2.5,
        }))
        .unwrap();
        assert_eq!(a.points, 2);

        let c: Contributor = serde_json::from_value(json!({
            "username": "alice",
            "total_points": -7.9,
            "activity_breakdown": {"PR opened": {"count": 1, "points": 3.99}},
        }))
        .unwrap();
        assert_eq!(c.total_points, -7);
        assert_eq!(c.activity_breakdown["PR opened"].points, 3);
    }

    #[test]
    fn test_non_numeric_points_are_rejected() {
        let res = serde_json::from_value::<Activity>(json!({
            "type": "PR opened",
            "points": "ten",
        }));
        assert!(res.is_err());
    }

    #[test]
    fn test_activity_missing_type_is_rejected() {
        let res = serde_json::from_value::<Activity>(json!({"occured_at": "2024-01-01"}));
        assert!(res.is_err());
    }

    #[test]
    fn test_classification_is_substring_based() {
        assert!(activity("PR opened").is_pull_request());
        assert!(!activity("PR opened").is_issue());
        assert!(activity("Issue opened").is_issue());

        let both = activity("PR Issue Linked");
        assert!(both.is_pull_request());
        assert!(both.is_issue());

        assert!(!activity("pr merged").is_pull_request());
    }

    #[test]
    fn test_contributor_null_activities_read_as_empty() {
        let c: Contributor = serde_json::from_value(json!({
            "username": "alice",
            "activities": null,
        }))
        .unwrap();
        assert!(c.activities.is_empty());
        assert!(c.raw_activities.is_none());
        assert_eq!(c.total_points, 0);
    }

    #[test]
    fn test_contributor_display_name_fallback() {
        let c: Contributor = serde_json::from_value(json!({"username": "bob"})).unwrap();
        assert_eq!(c.display_name(), "bob");

        let c: Contributor =
            serde_json::from_value(json!({"username": "bob", "name": "Bob B."})).unwrap();
        assert_eq!(c.display_name(), "Bob B.");
    }

    #[test]
    fn test_contributor_case_insensitive_username() {
        let c: Contributor = serde_json::from_value(json!({"username": "Alice"})).unwrap();
        assert!(c.has_username("alice"));
        assert!(c.has_username("ALICE"));
        assert!(!c.has_username("alic"));
    }

    #[test]
    fn test_profile_activities_prefers_raw() {
        let c: Contributor = serde_json::from_value(json!({
            "username": "alice",
            "activities": [{"type": "PR opened", "occured_at": "2024-01-01"}],
            "raw_activities": [
                {"type": "Issue opened", "occured_at": "2024-01-02"},
                {"type": "Issue opened", "occured_at": "2024-01-03"},
            ],
        }))
        .unwrap();
        assert_eq!(c.profile_activities().len(), 2);

        let c: Contributor = serde_json::from_value(json!({
            "username": "alice",
            "activities": [{"type": "PR opened", "occured_at": "2024-01-01"}],
        }))
        .unwrap();
        assert_eq!(c.profile_activities().len(), 1);
    }

    #[test]
    fn test_activity_leaders_keep_file_order() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{
                "entries": [],
                "topByActivity": {
                    "Issue opened": [{"username": "z", "points": 2, "count": 1}],
                    "PR merged": [],
                    "Commit": [{"username": "a", "points": 1, "count": 1}]
                }
            }"#,
        )
        .unwrap();
        let keys: Vec<&str> = snapshot.top_by_activity.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Issue opened", "PR merged", "Commit"]);
        assert_eq!(
            snapshot.top_by_activity.get("Commit").unwrap()[0].username,
            "a"
        );
    }

    #[test]
    fn test_activity_leaders_serialize_as_map() {
        let leaders = ActivityLeaders(vec![("PR opened".to_string(), vec![])]);
        let value = serde_json::to_value(&leaders).unwrap();
        assert_eq!(value, json!({"PR opened": []}));
    }

    #[test]
    fn test_snapshot_missing_fields_default() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.entries.is_empty());
        assert!(snapshot.top_by_activity.is_empty());
        assert!(snapshot.updated_at.is_none());
    }

    #[test]
    fn test_activity_item_copies_contributor_fields() {
        let c: Contributor = serde_json::from_value(json!({
            "username": "alice",
            "name": "Alice",
            "avatar_url": "https://avatars/alice.png",
            "role": "core",
        }))
        .unwrap();
        let mut a = activity("PR opened");
        a.points = 5;
        let item = ActivityItem::new(&c, &a, activity_slug("alice", &a, 3));

        assert_eq!(item.slug, "alice-PR opened-2024-01-01T00:00:00Z-3");
        assert_eq!(item.contributor_role.as_deref(), Some("core"));
        assert_eq!(item.closed_at, item.occured_at);
        assert_eq!(item.points, 5);
    }
}
