//! Bundler invocation through Node.js
//!
//! The bundler only has a JavaScript API, so each request is handed to a
//! short ES module driver run by `node`. The request travels as JSON on
//! stdin; the driver resolves `vite` and the requested plugin factories from
//! the workspace `node_modules` and calls `build`. A zero exit status is
//! success.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::core::builder::BuildEngine;
use crate::core::request::BuildRequest;
use crate::error::EngineError;

/// Driver executed with `node --input-type=module -e`
pub const DRIVER_SCRIPT: &str = r#"
import { createRequire } from 'node:module';
import { pathToFileURL } from 'node:url';
import path from 'node:path';

const chunks = [];
for await (const chunk of process.stdin) chunks.push(chunk);
const req = JSON.parse(Buffer.concat(chunks).toString('utf8'));

const require = createRequire(path.join(process.cwd(), 'package.json'));
const load = (id) => import(pathToFileURL(require.resolve(id)).href);

const plugins = [];
for (const spec of req.plugins) {
  const mod = await load(spec.module);
  const factory = spec.export === 'default'
    ? (mod.default && mod.default.default) || mod.default
    : mod[spec.export];
  if (typeof factory !== 'function') {
    throw new Error(`${spec.module} has no plugin factory export '${spec.export}'`);
  }
  plugins.push(factory());
}

const vite = await load('vite');
await vite.build({
  root: req.root,
  build: {
    outDir: req.out_dir,
    emptyOutDir: req.empty_out_dir,
    lib: {
      entry: req.entry,
      name: req.library_name,
      fileName: (format) => req.file_name.replaceAll('{format}', format),
      formats: req.formats,
    },
    rollupOptions: {
      external: req.external,
      output: { globals: req.globals },
    },
  },
  plugins,
});
"#;

/// Build engine backed by a Node.js process per request
#[derive(Debug, Clone)]
pub struct NodeEngine {
    /// Node executable name or path
    program: String,
    /// Directory module resolution starts from
    workspace_root: PathBuf,
}

impl NodeEngine {
    /// Create an engine running `program` in `workspace_root`
    pub fn new(program: impl Into<String>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workspace_root: workspace_root.into(),
        }
    }

    /// Locate the executable on PATH (or accept an explicit path)
    pub fn resolve_program(&self) -> Result<PathBuf, EngineError> {
        which::which(&self.program).map_err(|_| EngineError::NotFound {
            program: self.program.clone(),
        })
    }
}

#[async_trait]
impl BuildEngine for NodeEngine {
    async fn build(&self, request: &BuildRequest) -> Result<(), EngineError> {
        let program = self.resolve_program()?;
        let payload = request
            .to_json()
            .map_err(|e| EngineError::Encode(e.to_string()))?;

        tracing::debug!(
            "Invoking {} for {}",
            program.display(),
            request.root.display()
        );

        let mut child = Command::new(&program)
            .args(["--input-type=module", "-e", DRIVER_SCRIPT])
            .current_dir(&self.workspace_root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| EngineError::Spawn {
                program: self.program.clone(),
                error: e.to_string(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(payload.as_bytes()).await {
                Ok(()) => {}
                // The process exited without reading; its status decides.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!("Engine closed stdin early");
                }
                Err(e) => {
                    return Err(EngineError::Spawn {
                        program: self.program.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| EngineError::Spawn {
                program: self.program.clone(),
                error: e.to_string(),
            })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            tracing::debug!("engine: {line}");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!("Build engine failed for {}", request.root.display());
            return Err(EngineError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(())
    }
}
