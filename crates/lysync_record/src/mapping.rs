//! Per-entity-kind sync configuration.
//!
//! One [`EntityMapping`] value per synchronized entity kind replaces the
//! "one base service, many subclasses" shape: the generic engine consumes
//! the mapping, nothing inherits from anything.

use crate::coerce::{Coercion, YES_NO};

use Coercion::{Flag, Int, Timestamp, TrimmedString};

/// Maps one remote field to one local field through a coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name in the remote payload.
    pub remote: &'static str,
    /// Field name on the local entity.
    pub local: &'static str,
    /// Coercion applied to the raw value.
    pub coercion: Coercion,
}

const fn rule(remote: &'static str, local: &'static str, coercion: Coercion) -> FieldRule {
    FieldRule {
        remote,
        local,
        coercion,
    }
}

/// Configuration for synchronizing one entity kind.
#[derive(Debug, Clone)]
pub struct EntityMapping {
    /// Entity kind name, also the store table descriptor.
    pub kind: &'static str,
    /// Remote endpoint path for this kind.
    pub endpoint: &'static str,
    /// Remote field holding the unique key.
    pub unique_field: &'static str,
    /// Remote field holding the opaque change stamp.
    pub stamp_field: &'static str,
    /// Declared field rules; unmapped remote fields are dropped.
    pub fields: Vec<FieldRule>,
}

impl EntityMapping {
    /// Local field name the unique key lands under.
    ///
    /// Falls back to the remote name when the unique field has no declared
    /// rule.
    pub fn local_unique_field(&self) -> &'static str {
        self.fields
            .iter()
            .find(|r| r.remote == self.unique_field)
            .map(|r| r.local)
            .unwrap_or(self.unique_field)
    }

    /// Local field name the change stamp lands under.
    pub fn local_stamp_field(&self) -> &'static str {
        self.fields
            .iter()
            .find(|r| r.remote == self.stamp_field)
            .map(|r| r.local)
            .unwrap_or(self.stamp_field)
    }

    /// Returns the mapping for a known entity kind, if any.
    pub fn for_kind(kind: &str) -> Option<Self> {
        match kind {
            "alunos" => Some(Self::alunos()),
            _ => None,
        }
    }

    /// Entity kinds with a shipped mapping.
    pub fn known_kinds() -> &'static [&'static str] {
        &["alunos"]
    }

    /// The student table mapping.
    ///
    /// The complete field set of the remote `alunos` table; `aluno` is the
    /// registration number and unique key, `stamp_atualizacao` the opaque
    /// change stamp.
    pub fn alunos() -> Self {
        Self {
            kind: "alunos",
            endpoint: "/v2/tabela/alunos",
            unique_field: "aluno",
            stamp_field: "stamp_atualizacao",
            fields: vec![
                rule("aluno", "aluno", TrimmedString),
                rule("ano_ingresso", "ano_ingresso", Int),
                rule("anoconcl2g", "anoconcl2g", Int),
                rule("areacnpq", "areacnpq", TrimmedString),
                rule("candidato", "candidato", TrimmedString),
                rule("cidade2g", "cidade2g", TrimmedString),
                rule("classif_aluno", "classif_aluno", TrimmedString),
                rule("cod_cartao", "cod_cartao", TrimmedString),
                rule("concurso", "concurso", TrimmedString),
                rule("cred_educativo", "cred_educativo", TrimmedString),
                rule("creditos", "creditos", Int),
                rule("curriculo", "curriculo", TrimmedString),
                rule("curso", "curso", TrimmedString),
                rule("curso_ant", "curso_ant", TrimmedString),
                rule("discipoutraserie", "discipoutraserie", TrimmedString),
                rule("dist_aluno_unidade", "dist_aluno_unidade", Int),
                rule("dt_ingresso", "dt_ingresso", Timestamp),
                rule("e_mail_interno", "e_mail_interno", TrimmedString),
                rule("faculdade_conveniada", "faculdade_conveniada", TrimmedString),
                rule("grupo", "grupo", TrimmedString),
                rule("instituicao", "instituicao", TrimmedString),
                rule("nome_abrev", "nome_abrev", TrimmedString),
                rule("nome_compl", "nome_compl", TrimmedString),
                rule("nome_conjuge", "nome_conjuge", TrimmedString),
                rule("nome_social", "nome_social", TrimmedString),
                rule("num_chamada", "num_chamada", Int),
                rule("obs_aluno_finan", "obs_aluno_finan", TrimmedString),
                rule("obs_tel_com", "obs_tel_com", TrimmedString),
                rule("obs_tel_res", "obs_tel_res", TrimmedString),
                rule("outra_faculdade", "outra_faculdade", TrimmedString),
                rule("pais2g", "pais2g", TrimmedString),
                rule("pessoa", "pessoa", Int),
                rule("ref_aluno_ant", "ref_aluno_ant", TrimmedString),
                rule("representante_turma", "representante_turma", Flag(YES_NO)),
                rule("sem_ingresso", "sem_ingresso", Int),
                rule("serie", "serie", Int),
                rule("sit_aluno", "sit_aluno", TrimmedString),
                rule("sit_aprov", "sit_aprov", TrimmedString),
                rule("stamp_atualizacao", "stamp_atualizacao", TrimmedString),
                rule("tipo_aluno", "tipo_aluno", TrimmedString),
                rule("tipo_escola", "tipo_escola", TrimmedString),
                rule("tipo_ingresso", "tipo_ingresso", TrimmedString),
                rule("turma_pref", "turma_pref", TrimmedString),
                rule("turno", "turno", TrimmedString),
                rule("unidade_ensino", "unidade_ensino", TrimmedString),
                rule("unidade_fisica", "unidade_fisica", TrimmedString),
            ],
        }
    }
}
