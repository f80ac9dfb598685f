//! 경로 접근성 검사
//!
//! 인증서, 키, 키스토어, 트러스트스토어 경로는 프로세스가 읽을 수 있어야 하고
//! 쓸 수 없어야 합니다. 파일시스템 조회는 [`PathProbe`] 뒤에 두어
//! 테스트에서 교체할 수 있게 합니다.

use std::path::Path;

use tracing::trace;

use crate::error::ValidationError;

/// 경로 권한 조회
pub trait PathProbe: Send + Sync {
    /// 현재 프로세스가 읽을 수 있는지
    fn is_readable(&self, path: &Path) -> bool;

    /// 현재 프로세스가 쓸 수 있는지
    fn is_writable(&self, path: &Path) -> bool;
}

/// 실제 파일시스템 조회
///
/// unix에서는 `faccessat(2)`에 `AT_EACCESS`를 주어 실효 uid/gid 기준으로 확인합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPathProbe;

#[cfg(unix)]
impl FsPathProbe {
    fn access(path: &Path, mode: libc::c_int) -> bool {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
            return false;
        };
        // SAFETY: c_path는 NUL로 끝나는 유효한 C 문자열이며 호출 동안 살아 있습니다.
        unsafe { libc::faccessat(libc::AT_FDCWD, c_path.as_ptr(), mode, libc::AT_EACCESS) == 0 }
    }
}

#[cfg(unix)]
impl PathProbe for FsPathProbe {
    fn is_readable(&self, path: &Path) -> bool {
        Self::access(path, libc::R_OK)
    }

    fn is_writable(&self, path: &Path) -> bool {
        Self::access(path, libc::W_OK)
    }
}

#[cfg(not(unix))]
impl PathProbe for FsPathProbe {
    fn is_readable(&self, path: &Path) -> bool {
        if path.is_dir() {
            std::fs::read_dir(path).is_ok()
        } else {
            std::fs::File::open(path).is_ok()
        }
    }

    fn is_writable(&self, path: &Path) -> bool {
        std::fs::metadata(path)
            .map(|meta| !meta.permissions().readonly())
            .unwrap_or(false)
    }
}

/// 경로가 읽기 가능하고 쓰기 불가능한지 확인합니다.
///
/// `label`은 에러 메시지에 쓰이는 옵션 이름입니다.
pub fn ensure_readable_and_non_writable(
    probe: &dyn PathProbe,
    label: &'static str,
    path: &Path,
) -> Result<(), ValidationError> {
    trace!(label, path = %path.display(), "probing credential path");

    if !probe.is_readable(path) {
        return Err(ValidationError::UnreadablePath {
            label,
            path: path.to_path_buf(),
        });
    }
    if probe.is_writable(path) {
        return Err(ValidationError::WritablePath {
            label,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
