//! # Owner Directory
//!
//! Per-account paged index of owned entry keys.
//!
//! ## Layout
//!
//! ```text
//!   root (page 0) ──next──→ page 1 ──next──→ page 2 ──next──→ (0 = root)
//!        ↑  └────────────────────prev (last page)─────────────────┘
//!        └──────prev────────── page 1 ←──prev── page 2
//! ```
//!
//! New keys are appended to the last page. A full last page gets a successor
//! numbered one higher. Each owned entry remembers the page it landed on and
//! hands it back as the hint for removal.
//!
//! ## Removal Hints
//!
//! A hint that does not lead to the key is a consistency failure, not a
//! business outcome. There is no fallback scan.

use super::entries::{DirectoryNode, LedgerEntry};
use super::errors::LedgerError;
use super::keylet::{self, Keylet, ROOT_PAGE};
use crate::ports::{ApplyView, ReadView};
use shared_types::{AccountId, Hash};

/// Page number returned by an insert, used to find the key again on removal.
pub type PageHint = u64;

fn peek_page<'v, V: ApplyView + ?Sized>(
    view: &'v mut V,
    directory: &Hash,
    page: u64,
) -> Result<&'v mut DirectoryNode, LedgerError> {
    view.peek(&keylet::page(directory, page).key)
        .and_then(LedgerEntry::as_directory_mut)
        .ok_or(LedgerError::BrokenDirectoryLink {
            directory: *directory,
            page,
        })
}

/// Append `key` to the directory rooted at `directory`.
///
/// `describe` is applied to every newly created page. Returns the page the
/// key was written to.
pub fn dir_insert<V, F>(
    view: &mut V,
    directory: &Keylet,
    key: Hash,
    describe: F,
) -> Result<PageHint, LedgerError>
where
    V: ApplyView + ?Sized,
    F: Fn(&mut DirectoryNode),
{
    let root_key = directory.key;
    let limits = *view.directory_limits();

    let root_back_link = view
        .read(&root_key)
        .map(|entry| entry.as_directory().map(|root| root.index_previous));
    let last_page = match root_back_link {
        None => {
            let mut root = DirectoryNode::new(root_key);
            root.indexes.push(key);
            describe(&mut root);
            view.insert(root_key, LedgerEntry::DirectoryNode(root))?;
            return Ok(ROOT_PAGE);
        }
        Some(None) => {
            return Err(LedgerError::BrokenDirectoryLink {
                directory: root_key,
                page: ROOT_PAGE,
            })
        }
        Some(Some(last_page)) => last_page,
    };

    {
        let node = peek_page(view, &root_key, last_page)?;
        if node.indexes.len() < limits.max_entries_per_page {
            node.indexes.push(key);
            return Ok(last_page);
        }
    }

    let new_page = match last_page.checked_add(1) {
        Some(page) if page < limits.max_pages => page,
        _ => {
            return Err(LedgerError::DirectoryFull {
                directory: root_key,
            })
        }
    };

    peek_page(view, &root_key, last_page)?.index_next = new_page;
    peek_page(view, &root_key, ROOT_PAGE)?.index_previous = new_page;

    let mut node = DirectoryNode::new(root_key);
    node.indexes.push(key);
    node.index_previous = last_page;
    describe(&mut node);
    view.insert(
        keylet::page(&root_key, new_page).key,
        LedgerEntry::DirectoryNode(node),
    )?;

    Ok(new_page)
}

/// Remove `key` from page `page` of the directory rooted at `directory`.
///
/// Empty non-root pages are unlinked and erased. An empty root with no other
/// pages is erased unless `keep_root` is set.
pub fn dir_remove<V>(
    view: &mut V,
    directory: &Keylet,
    page: PageHint,
    key: &Hash,
    keep_root: bool,
) -> Result<(), LedgerError>
where
    V: ApplyView + ?Sized,
{
    let root_key = directory.key;
    let page_key = keylet::page(&root_key, page).key;
    let missing = LedgerError::DirectoryEntryMissing { page, key: *key };

    let (prev, next) = {
        let node = view
            .peek(&page_key)
            .and_then(LedgerEntry::as_directory_mut)
            .ok_or_else(|| missing.clone())?;
        let pos = node
            .indexes
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| missing.clone())?;
        node.indexes.remove(pos);
        if !node.indexes.is_empty() {
            return Ok(());
        }
        (node.index_previous, node.index_next)
    };

    if page == ROOT_PAGE {
        if prev == ROOT_PAGE && next == ROOT_PAGE {
            if !keep_root {
                view.erase(&page_key)?;
            }
            return Ok(());
        }

        // The root is empty but other pages remain. If the only other page is
        // also empty the whole directory can go.
        if prev == next {
            let last_key = keylet::page(&root_key, prev).key;
            let last_empty = view
                .read(&last_key)
                .and_then(LedgerEntry::as_directory)
                .map(|n| n.indexes.is_empty())
                .ok_or(LedgerError::BrokenDirectoryLink {
                    directory: root_key,
                    page: prev,
                })?;
            if last_empty {
                view.erase(&last_key)?;
                let root = peek_page(view, &root_key, ROOT_PAGE)?;
                root.index_next = ROOT_PAGE;
                root.index_previous = ROOT_PAGE;
                if !keep_root {
                    view.erase(&page_key)?;
                }
            }
        }
        return Ok(());
    }

    if prev == page || next == page {
        return Err(LedgerError::BrokenDirectoryLink {
            directory: root_key,
            page,
        });
    }

    peek_page(view, &root_key, prev)?.index_next = next;
    peek_page(view, &root_key, next)?.index_previous = prev;
    view.erase(&page_key)?;

    if !keep_root && prev == ROOT_PAGE && next == ROOT_PAGE {
        let root_empty = view
            .read(&root_key)
            .and_then(LedgerEntry::as_directory)
            .map(|n| n.indexes.is_empty())
            .unwrap_or(false);
        if root_empty {
            view.erase(&root_key)?;
        }
    }

    Ok(())
}

/// Every key in the directory, in page order.
pub fn dir_entries<V>(view: &V, directory: &Keylet) -> Result<Vec<Hash>, LedgerError>
where
    V: ReadView + ?Sized,
{
    let root_key = directory.key;
    let max_pages = view.directory_limits().max_pages;
    let mut keys = Vec::new();
    let mut page = ROOT_PAGE;
    let mut visited = 0u64;

    loop {
        let node = match view
            .read(&keylet::page(&root_key, page).key)
            .and_then(LedgerEntry::as_directory)
        {
            Some(node) => node,
            None if page == ROOT_PAGE => return Ok(keys),
            None => {
                return Err(LedgerError::BrokenDirectoryLink {
                    directory: root_key,
                    page,
                })
            }
        };
        keys.extend_from_slice(&node.indexes);
        page = node.index_next;
        visited += 1;
        if page == ROOT_PAGE {
            return Ok(keys);
        }
        if visited >= max_pages {
            return Err(LedgerError::BrokenDirectoryLink {
                directory: root_key,
                page,
            });
        }
    }
}

/// An account's owner directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OwnerDirectory {
    owner: AccountId,
    keylet: Keylet,
}

impl OwnerDirectory {
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            keylet: keylet::owner_dir(&owner),
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn keylet(&self) -> &Keylet {
        &self.keylet
    }

    /// Record `key` as owned. Fails with `DirectoryFull` when no page can
    /// take it.
    pub fn insert<V: ApplyView + ?Sized>(
        &self,
        view: &mut V,
        key: Hash,
    ) -> Result<PageHint, LedgerError> {
        let owner = self.owner;
        dir_insert(view, &self.keylet, key, |node| node.owner = Some(owner))
    }

    /// Remove `key` using the page hint stored on the owned entry.
    pub fn remove<V: ApplyView + ?Sized>(
        &self,
        view: &mut V,
        hint: PageHint,
        key: &Hash,
    ) -> Result<(), LedgerError> {
        dir_remove(view, &self.keylet, hint, key, false)
    }

    pub fn entries<V: ReadView + ?Sized>(&self, view: &V) -> Result<Vec<Hash>, LedgerError> {
        dir_entries(view, &self.keylet)
    }
}
