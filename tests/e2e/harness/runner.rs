use super::assertions::Assertion;
use super::steps::ScenarioStep;
use super::workspace::TestWorkspace;
use anyhow::{bail, Context, Result};
use grit_core::{Commit, CommitId, Repository, ReplayDecision, ReplayOperator};
use std::collections::{HashMap, VecDeque};
use std::fs;

/// Replays a scripted list of decisions, keeping everything once the
/// script runs out.
struct ScriptOperator {
    decisions: VecDeque<ReplayDecision>,
}

impl ReplayOperator for ScriptOperator {
    fn decide(&mut self, _commit: &Commit) -> ReplayDecision {
        self.decisions.pop_front().unwrap_or(ReplayDecision::Keep)
    }
}

/// Executes scenario steps against a repository in a temp workspace.
pub struct ScenarioRunner {
    name: String,
    workspace: TestWorkspace,
    repo: Option<Repository>,
}

impl ScenarioRunner {
    /// Sets up the workspace and initializes the repository in it.
    pub fn new(
        name: &str,
        fixture: Option<&str>,
        initial_files: HashMap<String, Vec<u8>>,
    ) -> Result<Self> {
        let workspace = match fixture {
            Some(fixture) => TestWorkspace::from_fixture(fixture)?,
            None => TestWorkspace::empty()?,
        };
        for (path, content) in initial_files {
            workspace.write_file(&path, &content)?;
        }
        let repo = workspace.init_repo()?;
        Ok(Self {
            name: name.to_string(),
            workspace,
            repo: Some(repo),
        })
    }

    pub fn run(&mut self, steps: &[ScenarioStep], assertions: &[Assertion]) -> Result<()> {
        for (i, step) in steps.iter().enumerate() {
            self.execute(step)
                .with_context(|| format!("scenario {}: step {} {:?}", self.name, i, step))?;
        }
        for assertion in assertions {
            self.check(assertion)
                .with_context(|| format!("scenario {}: assertion {:?}", self.name, assertion))?;
        }
        Ok(())
    }

    fn repo(&mut self) -> &mut Repository {
        self.repo.as_mut().expect("repository handle present")
    }

    /// Resolves the single commit carrying a message.
    fn resolve(&mut self, message: &str) -> Result<CommitId> {
        let ids = self.repo().find(message);
        match ids.as_slice() {
            [id] => Ok(*id),
            [] => bail!("no commit with message {:?}", message),
            _ => bail!("message {:?} is ambiguous ({} commits)", message, ids.len()),
        }
    }

    fn execute(&mut self, step: &ScenarioStep) -> Result<()> {
        match step {
            ScenarioStep::WriteFile { path, content } => {
                self.workspace.write_file(path, content)?;
            }
            ScenarioStep::DeleteFile { path } => {
                fs::remove_file(self.workspace.path().join(path))?;
            }
            ScenarioStep::Add { path } => self.repo().add(path)?,
            ScenarioStep::Remove { path } => self.repo().remove(path)?,
            ScenarioStep::Commit { message } => {
                self.repo().commit(message)?;
            }
            ScenarioStep::Branch { name } => self.repo().branch(name)?,
            ScenarioStep::RemoveBranch { name } => self.repo().remove_branch(name)?,
            ScenarioStep::Checkout { branch } => self.repo().checkout_branch(branch)?,
            ScenarioStep::CheckoutFile { path } => self.repo().checkout_file(path)?,
            ScenarioStep::CheckoutFileAt { message, path } => {
                let id = self.resolve(message)?;
                self.repo().checkout_file_at(id, path)?;
            }
            ScenarioStep::Reset { message } => {
                let id = self.resolve(message)?;
                self.repo().reset(id)?;
            }
            ScenarioStep::Merge { branch } => {
                self.repo().merge(branch)?;
            }
            ScenarioStep::Rebase { branch, decisions } => {
                let mut operator = ScriptOperator {
                    decisions: decisions.iter().cloned().collect(),
                };
                self.repo().rebase_with(branch, &mut operator)?;
            }
            ScenarioStep::Reopen => {
                if let Some(repo) = self.repo.take() {
                    repo.save()?;
                }
                self.repo = Some(self.workspace.open_repo()?);
            }
        }
        Ok(())
    }

    fn check(&mut self, assertion: &Assertion) -> Result<()> {
        match assertion {
            Assertion::CurrentBranch(name) => {
                let current = self.repo().current_branch().to_string();
                if current != *name {
                    bail!("current branch is {:?}", current);
                }
            }
            Assertion::BranchExists(name) => {
                if !self.repo().refs().contains(name) {
                    bail!("branch {:?} does not exist", name);
                }
            }
            Assertion::BranchMissing(name) => {
                if self.repo().refs().contains(name) {
                    bail!("branch {:?} exists", name);
                }
            }
            Assertion::CommitCount(expected) => {
                let count = self.repo().global_log().len();
                if count != *expected {
                    bail!("repository has {} commits", count);
                }
            }
            Assertion::HeadMessage(expected) => {
                let head = self.head()?;
                if head.message != *expected {
                    bail!("head message is {:?}", head.message);
                }
            }
            Assertion::HeadTracks { path } => {
                if !self.head()?.tracks(path) {
                    bail!("head does not track {:?}", path);
                }
            }
            Assertion::HeadMissing { path } => {
                if self.head()?.tracks(path) {
                    bail!("head tracks {:?}", path);
                }
            }
            Assertion::FileContent { path, content } => {
                let actual = self.workspace.read_file(path)?;
                if actual != *content {
                    bail!(
                        "{} contains {:?}",
                        path,
                        String::from_utf8_lossy(&actual)
                    );
                }
            }
            Assertion::FileAbsentOnDisk { path } => {
                if self.workspace.file_exists(path) {
                    bail!("{} exists on disk", path);
                }
            }
            Assertion::StagedEmpty => {
                let report = self.repo().status();
                if !report.staged.is_empty() || !report.pending_removal.is_empty() {
                    bail!("working set is not empty: {:?}", report);
                }
            }
            Assertion::Staged { path } => {
                if !self.repo().status().staged.contains(path) {
                    bail!("{} is not staged", path);
                }
            }
            Assertion::PendingRemoval { path } => {
                if !self.repo().status().pending_removal.contains(path) {
                    bail!("{} is not marked for removal", path);
                }
            }
            Assertion::Custom(check) => check(self.repo())?,
        }
        Ok(())
    }

    fn head(&mut self) -> Result<Commit> {
        let id = self.repo().head_id()?;
        let repo = self.repo();
        repo.graph()
            .get(id)
            .cloned()
            .context("head commit missing from graph")
    }
}
