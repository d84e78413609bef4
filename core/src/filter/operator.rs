// core/src/filter/operator.rs

/// Query-string comparison operators, spelled `field[op]` by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
  Eq,
  Ne,
  Lt,
  Lte,
  Gt,
  Gte,
  /// Case-sensitive substring match.
  Like,
  /// Case-insensitive substring match.
  ILike,
  NotLike,
  NotILike,
}

use FilterOperator::*;

impl FilterOperator {
  pub const EQUALITY: &'static [FilterOperator] = &[Eq, Ne];
  pub const COMPARISON: &'static [FilterOperator] = &[Eq, Lt, Lte, Gt, Gte, Ne];
  pub const SUBSTRING: &'static [FilterOperator] = &[Like, ILike, NotLike, NotILike];

  pub fn from_token(token: &str) -> Option<Self> {
    let op = match token {
      "eq" => Eq,
      "ne" => Ne,
      "lt" => Lt,
      "lte" => Lte,
      "gt" => Gt,
      "gte" => Gte,
      "lk" => Like,
      "ilk" => ILike,
      "nlk" => NotLike,
      "inlk" => NotILike,
      _ => return None,
    };
    Some(op)
  }

  pub fn token(self) -> &'static str {
    match self {
      Eq => "eq",
      Ne => "ne",
      Lt => "lt",
      Lte => "lte",
      Gt => "gt",
      Gte => "gte",
      Like => "lk",
      ILike => "ilk",
      NotLike => "nlk",
      NotILike => "inlk",
    }
  }

  /// PostgreSQL spelling of the operator.
  pub fn sql(self) -> &'static str {
    match self {
      Eq => "=",
      Ne => "<>",
      Lt => "<",
      Lte => "<=",
      Gt => ">",
      Gte => ">=",
      Like => "LIKE",
      ILike => "ILIKE",
      NotLike => "NOT LIKE",
      NotILike => "NOT ILIKE",
    }
  }

  pub fn is_substring(self) -> bool {
    matches!(self, Like | ILike | NotLike | NotILike)
  }
}

impl std::fmt::Display for FilterOperator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.token())
  }
}
