// An ordered, append-only statement list with monotonically assigned identities.

use super::stmt::{Stmt, StmtId, StmtKind};

#[derive(Debug, Clone, Default)]
pub struct Ir {
    stmts: Vec<Stmt>,
    next_id: usize,
}

impl Ir {
    pub fn new() -> Self {
        Self { stmts: Vec::new(), next_id: 0 }
    }

    /// An empty IR whose first identity will be `next_id`.
    ///
    /// Used by passes that write a new IR next to the one they read, so the
    /// two never hand out the same identity.
    pub fn with_next_id(next_id: usize) -> Self {
        Self { stmts: Vec::new(), next_id }
    }

    /// Append a new statement, assigning it the next identity.
    pub fn push(&mut self, kind: impl Into<StmtKind>) -> StmtId {
        let id = self.reserve_id();
        self.stmts.push(Stmt { id, kind: kind.into() });
        id
    }

    /// Append a copy of `stmt`, keeping its identity.
    pub fn push_clone(&mut self, stmt: &Stmt) -> StmtId {
        self.next_id = self.next_id.max(stmt.id.0 + 1);
        self.stmts.push(stmt.clone());
        stmt.id
    }

    /// Hand out an identity that no statement in this IR will ever carry.
    pub fn reserve_id(&mut self) -> StmtId {
        let id = StmtId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The identity the next `push` will assign.
    pub fn next_id(&self) -> usize {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.stmts.iter()
    }

    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    /// Look a statement up by identity.
    pub fn get(&self, id: StmtId) -> Option<&Stmt> {
        // Identities are increasing in push order unless clones were mixed in.
        match self.stmts.binary_search_by_key(&id, |s| s.id) {
            Ok(pos) => Some(&self.stmts[pos]),
            Err(_) => self.stmts.iter().find(|s| s.id == id),
        }
    }

    pub fn to_lines(&self) -> Vec<String> {
        self.stmts.iter().map(|s| s.to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a Ir {
    type Item = &'a Stmt;
    type IntoIter = std::slice::Iter<'a, Stmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.stmts.iter()
    }
}
