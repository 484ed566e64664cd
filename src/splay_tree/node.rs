use crate::arena::Index;
use crate::entry::Entry;

pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    // Non-owning back-link. Teardown and release only ever follow `left` and `right`.
    pub parent: Option<Index>,
    pub left: Option<Index>,
    pub right: Option<Index>,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U, parent: Option<Index>) -> Self {
        Node {
            entry: Entry { key, value },
            parent,
            left: None,
            right: None,
        }
    }
}
