//! Pure helpers over already fetched records. Nothing in here does I/O.

use std::collections::{BTreeMap, HashMap};

use crate::schema::{ActionType, User};

/// Placeholder for users that cannot be resolved or have nothing to show.
pub const UNKNOWN_USER: &str = "Unknown user";

/// Pairs every primary record with the first secondary record whose key matches its foreign key.
///
/// Primary records without a match are kept, paired with `None`.
pub fn left_join<P, S: Clone>(
	primary: impl IntoIterator<Item = P>,
	secondary: &[S],
	foreign_key: impl Fn(&P) -> &str,
	key: impl Fn(&S) -> &str,
) -> Vec<(P, Option<S>)> {
	let mut lookup = HashMap::with_capacity(secondary.len());
	for record in secondary {
		lookup.entry(key(record)).or_insert(record);
	}

	primary
		.into_iter()
		.map(|record| {
			let matched = lookup.get(foreign_key(&record)).map(|s| (*s).clone());
			(record, matched)
		})
		.collect()
}

/// Counts per action type; every known type is present, even at zero.
pub fn count_by_type(types: impl IntoIterator<Item = ActionType>) -> BTreeMap<ActionType, usize> {
	let mut counts = ActionType::ALL
		.into_iter()
		.map(|kind| (kind, 0))
		.collect::<BTreeMap<_, _>>();

	for kind in types {
		*counts.entry(kind).or_default() += 1;
	}

	counts
}

/// The first `n` records, in the order given.
#[must_use]
pub fn recent<T: Clone>(records: &[T], n: usize) -> Vec<T> {
	records.iter().take(n).cloned().collect()
}

#[must_use]
pub fn eq_ignore_case(value: &str, query: &str) -> bool {
	value.to_lowercase() == query.to_lowercase()
}

#[must_use]
pub fn contains_ignore_case(value: &str, query: &str) -> bool {
	value.to_lowercase().contains(&query.to_lowercase())
}

/// Name, then username, then email, then [`UNKNOWN_USER`].
#[must_use]
pub fn display_name(user: Option<&User>) -> String {
	user.and_then(|user| {
		[
			Some(user.name.as_str()),
			user.username.as_deref(),
			user.email.as_deref(),
		]
		.into_iter()
		.flatten()
		.find(|candidate| !candidate.trim().is_empty())
	})
	.unwrap_or(UNKNOWN_USER)
	.to_string()
}

/// `user id -> display name` for every user given.
#[must_use]
pub fn user_names(users: &[User]) -> HashMap<&str, String> {
	users
		.iter()
		.map(|user| (user.id.as_str(), display_name(Some(user))))
		.collect()
}
