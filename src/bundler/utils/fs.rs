//! File system utilities for staging.
//!
//! Provides safe file operations with automatic directory creation,
//! symlink preservation, and comprehensive error handling.

use crate::bundler::error::{Error, Result};
use std::{
    io::{self},
    path::Path,
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    Ok(fs::create_dir_all(path).await?)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e.into()),
    }
}

/// Removes a file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Makes a symbolic link.
#[cfg(unix)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link.
#[cfg(windows)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir).await?;
    }
    fs::copy(from, to).await?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them.
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_dir() {
        return Err(Error::GenericError(format!("{from:?} is not a Directory")));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }

        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())?;
                symlink(&target, &dest_path)?;
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)?;
            } else {
                std::fs::copy(entry.path(), dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Copies a file or a directory tree to `to`.
pub async fn copy_path(from: &Path, to: &Path) -> Result<()> {
    if from.is_dir() {
        copy_dir(from, to).await
    } else {
        copy_file(from, to).await
    }
}

/// Clears group and other write bits on every entry below `root`
/// (the equivalent of `chmod -Rf go-w`). Symlinks are left alone.
#[cfg(unix)]
pub async fn remove_group_other_write(root: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let root = root.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        for entry in walkdir::WalkDir::new(&root).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_symlink() {
                continue;
            }
            let mut perms = entry.metadata()?.permissions();
            let mode = perms.mode();
            let stripped = mode & !0o022;
            if stripped != mode {
                perms.set_mode(stripped);
                std::fs::set_permissions(entry.path(), perms)?;
            }
        }
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Permission fix task panicked: {}", e)))?
}

/// Permission bits are not group/other based on this platform.
#[cfg(not(unix))]
pub async fn remove_group_other_write(_root: &Path) -> Result<()> {
    Ok(())
}

/// Gives the owner write access to every directory below `root` so the tree
/// can be deleted. Copies of read-only trees keep their `0555` directories.
///
/// Blocking; also called from `Drop`.
#[cfg(unix)]
pub fn restore_owner_write(root: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    for entry in walkdir::WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let mut perms = entry.metadata()?.permissions();
        let mode = perms.mode();
        if mode & 0o200 == 0 {
            perms.set_mode(mode | 0o200);
            std::fs::set_permissions(entry.path(), perms)?;
        }
    }
    Ok(())
}

/// Read-only directories do not block deletion on this platform.
#[cfg(not(unix))]
pub fn restore_owner_write(_root: &Path) -> Result<()> {
    Ok(())
}

/// Total size in bytes of regular files below `root` (symlinks not followed).
pub async fn dir_size(root: &Path) -> Result<u64> {
    let root = root.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<u64> {
        let mut total = 0u64;
        for entry in walkdir::WalkDir::new(&root).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_file() {
                total += entry.metadata()?.len();
            }
        }
        Ok(total)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Size calculation task panicked: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_dir_preserves_tree_and_symlinks() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        std::fs::write(src.join("nested/file.txt"), b"hello").unwrap();
        symlink(Path::new("nested/file.txt"), &src.join("link")).unwrap();

        let dst = tmp.path().join("out/copy");
        copy_dir(&src, &dst).await.unwrap();

        assert_eq!(std::fs::read(dst.join("nested/file.txt")).unwrap(), b"hello");
        let link = std::fs::read_link(dst.join("link")).unwrap();
        assert_eq!(link, Path::new("nested/file.txt"));
    }

    #[tokio::test]
    async fn copy_file_rejects_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = copy_file(tmp.path(), &tmp.path().join("x")).await.unwrap_err();
        assert!(err.to_string().contains("is not a file"));
    }

    #[tokio::test]
    async fn remove_helpers_are_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        remove_dir_all(&tmp.path().join("nope")).await.unwrap();
        remove_file(&tmp.path().join("nope.txt")).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn group_other_write_is_cleared() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("shared.txt");
        std::fs::write(&file, b"x").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o666)).unwrap();

        remove_group_other_write(tmp.path()).await.unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn read_only_directories_become_owner_writable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let locked = tmp.path().join("Contents/Resources");
        std::fs::create_dir_all(&locked).unwrap();
        std::fs::write(locked.join("data"), b"x").unwrap();
        for dir in [&locked, &tmp.path().join("Contents")] {
            std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o555)).unwrap();
        }

        restore_owner_write(tmp.path()).unwrap();

        for dir in [tmp.path().join("Contents"), locked] {
            let mode = std::fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o755, "{}", dir.display());
        }
    }

    #[tokio::test]
    async fn dir_size_sums_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a"), vec![0u8; 100]).unwrap();
        std::fs::create_dir(tmp.path().join("d")).unwrap();
        std::fs::write(tmp.path().join("d/b"), vec![0u8; 28]).unwrap();
        assert_eq!(dir_size(tmp.path()).await.unwrap(), 128);
    }
}
