//! Pure operations over ordered entity collections.
//!
//! Every function takes the collection by reference and returns a new `Vec`;
//! the input is never modified. Untouched entities keep their relative order.

/// Append one entity. Duplicate IDs are allowed.
pub fn add_one<E: Clone>(collection: &[E], entity: E) -> Vec<E> {
    let mut out = Vec::with_capacity(collection.len() + 1);
    out.extend_from_slice(collection);
    out.push(entity);
    out
}

/// Append entities in the given order.
pub fn add_many<E, I>(collection: &[E], entities: I) -> Vec<E>
where
    E: Clone,
    I: IntoIterator<Item = E>,
{
    let mut out = collection.to_vec();
    out.extend(entities);
    out
}

/// Replace the first entity whose ID matches `entity`'s ID, in place.
///
/// Later entities sharing that ID are left alone. Without a match the result
/// equals the input.
pub fn update_one<E, ID, F>(collection: &[E], entity: E, id_of: F) -> Vec<E>
where
    E: Clone,
    ID: PartialEq,
    F: Fn(&E) -> ID,
{
    let target = id_of(&entity);
    let mut out = collection.to_vec();

    if let Some(slot) = out.iter_mut().find(|e| id_of(e) == target) {
        *slot = entity;
    }

    out
}

/// Remove every entity whose ID equals `id`.
pub fn delete_one<E, ID, F>(collection: &[E], id: &ID, id_of: F) -> Vec<E>
where
    E: Clone,
    ID: PartialEq,
    F: Fn(&E) -> ID,
{
    collection
        .iter()
        .filter(|e| id_of(e) != *id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Todo {
        id: u32,
        title: &'static str,
    }

    fn todo(id: u32, title: &'static str) -> Todo {
        Todo { id, title }
    }

    fn id_of(t: &Todo) -> u32 {
        t.id
    }

    #[test]
    fn test_add_one_appends() {
        let todos = vec![todo(1, "a")];
        let out = add_one(&todos, todo(1, "dup"));

        assert_eq!(out, vec![todo(1, "a"), todo(1, "dup")]);
        assert_eq!(todos.len(), 1);
    }

    #[test]
    fn test_add_many_keeps_order() {
        let todos = vec![todo(1, "a")];
        let out = add_many(&todos, vec![todo(3, "c"), todo(2, "b")]);
        assert_eq!(out, vec![todo(1, "a"), todo(3, "c"), todo(2, "b")]);

        let copy = add_many(&todos, Vec::new());
        assert_eq!(copy, todos);
    }

    #[test]
    fn test_update_one_preserves_position() {
        let todos = vec![todo(1, "a"), todo(2, "b")];
        let out = update_one(&todos, todo(2, "c"), id_of);

        assert_eq!(out, vec![todo(1, "a"), todo(2, "c")]);
        assert_eq!(todos[1].title, "b");
    }

    #[test]
    fn test_update_one_first_match_only() {
        let todos = vec![todo(1, "a"), todo(1, "b")];
        let out = update_one(&todos, todo(1, "z"), id_of);
        assert_eq!(out, vec![todo(1, "z"), todo(1, "b")]);
    }

    #[test]
    fn test_update_one_no_match() {
        let todos = vec![todo(1, "a")];
        assert_eq!(update_one(&todos, todo(9, "z"), id_of), todos);
    }

    #[test]
    fn test_delete_one_removes_all_matches() {
        let todos = vec![todo(1, "a"), todo(2, "b"), todo(1, "c")];
        let out = delete_one(&todos, &1, id_of);

        assert_eq!(out, vec![todo(2, "b")]);
        assert_eq!(todos.len(), 3);
    }

    #[test]
    fn test_delete_one_no_match() {
        let todos = vec![todo(1, "a")];
        assert_eq!(delete_one(&todos, &5, id_of), todos);
    }
}
