//! Data-access layer: the shared abstract base and one repository per entity.

use scaf_core::schema::SchemaDescriptor;

/// File stem of the shared base class.
pub const BASE_CLASS: &str = "BaseRepository";

/// Class name of the repository for `descriptor`.
#[must_use]
pub fn class_name(descriptor: &SchemaDescriptor) -> String {
    format!("{}Repository", descriptor.entity_name())
}

/// Shared base repository. The generator writes it only when absent.
#[must_use]
pub fn render_base(namespace: &str) -> String {
    format!(
        "<?php

namespace {namespace};

use Illuminate\\Database\\Eloquent\\Model;

abstract class {BASE_CLASS}
{{
    protected $model;

    public function __construct(Model $model)
    {{
        $this->model = $model;
    }}

    public function all(array $relations = [])
    {{
        $query = $this->model->newQuery();

        if (!empty($relations)) {{
            $query->with($relations);
        }}

        return $query->get();
    }}

    public function find($id, array $relations = [])
    {{
        $query = $this->model->newQuery();

        if (!empty($relations)) {{
            $query->with($relations);
        }}

        return $query->findOrFail($id);
    }}

    public function create(array $data)
    {{
        return $this->model->create($data);
    }}

    public function update($id, array $data)
    {{
        $model = $this->find($id);
        $model->update($data);

        return $model;
    }}

    public function delete($id)
    {{
        $model = $this->find($id);
        $model->delete();

        return true;
    }}
}}
"
    )
}

/// Entity repository bound to its model.
#[must_use]
pub fn render(descriptor: &SchemaDescriptor, namespace: &str, models_namespace: &str) -> String {
    let entity = descriptor.entity_name();
    let class = class_name(descriptor);
    format!(
        "<?php

namespace {namespace};

use {models_namespace}\\{entity};

class {class} extends {BASE_CLASS}
{{
    public function __construct({entity} $model)
    {{
        parent::__construct($model);
    }}

    public function all(array $relations = [])
    {{
        return parent::all($relations);
    }}
}}
"
    )
}
