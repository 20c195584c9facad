pub mod answers;
pub mod article;
pub mod contract;
pub mod question;

pub use answers::{AnswerSet, CLAUSE_ANSWER_PREFIX};
pub use article::{Article, ArticleOrigin};
pub use contract::{
    Clause, ContractConfig, Contracts, GeneratedContract, Project, ProjectDefinition, Role,
};
pub use question::{Condition, Operator, Question, QuestionKind};
